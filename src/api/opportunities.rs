use super::*;

impl OpportunityApi for ApiClient {
    fn list_opportunities(&self, filters: &OpportunityFilters) -> ApiResult<Vec<Opportunity>> {
        tracing::debug!(?filters, "GET /opportunities");
        let req = self.client.get(self.url("/opportunities")).query(filters);
        self.send_json(req, "list opportunities")
    }

    fn get_opportunity(&self, id: &str) -> ApiResult<Opportunity> {
        tracing::debug!(id, "GET /opportunities/{{id}}");
        let req = self.client.get(self.record_url(id)?);
        self.send_json(req, "get opportunity")
    }

    fn create_opportunity(&self, input: &OpportunityInput) -> ApiResult<Opportunity> {
        tracing::debug!(salesforce_id = %input.salesforce_id, "POST /opportunities");
        let req = self.client.post(self.url("/opportunities")).json(input);
        self.send_json(req, "create opportunity")
    }

    fn update_opportunity(&self, id: &str, input: &OpportunityInput) -> ApiResult<Opportunity> {
        tracing::debug!(id, "PUT /opportunities/{{id}}");
        let req = self
            .client
            .put(self.record_url(id)?)
            .json(input);
        self.send_json(req, "update opportunity")
    }

    fn delete_opportunity(&self, id: &str) -> ApiResult<()> {
        tracing::debug!(id, "DELETE /opportunities/{{id}}");
        let req = self.client.delete(self.record_url(id)?);
        let _ = self.send(req, "delete opportunity")?;
        Ok(())
    }

    fn stats(&self) -> ApiResult<OpportunityStats> {
        let req = self.client.get(self.url("/stats"));
        self.send_json(req, "stats")
    }

    fn deals_needing_attention(&self) -> ApiResult<Vec<DealNeedingAttention>> {
        let req = self.client.get(self.url("/deals-needing-attention"));
        self.send_json(req, "deals needing attention")
    }
}
