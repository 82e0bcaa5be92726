use oppdesk::api::OpportunityApi;
use oppdesk::format;
use oppdesk::screens::stage_rows;

use super::*;

pub(super) fn handle_stats_command(client: &ApiClient, json: bool) -> Result<()> {
    let stats = client.stats().context("load stats")?;
    if json {
        return print_json(&stats, "stats");
    }

    println!("opportunities: {}", stats.total_opportunities);
    println!(
        "with services: {}",
        stats.total_opportunities_with_services
    );
    println!("pipeline: {}", format::currency(Some(stats.total_amount)));
    println!(
        "services: {}",
        format::currency(Some(stats.total_services_amount))
    );
    println!(
        "logo attach rate: {}",
        format::percent(stats.services_logo_attach_rate)
    );
    println!(
        "dollar attach rate: {}",
        format::percent(stats.services_dollar_attach_rate)
    );
    println!("synced in last 30 days: {}", stats.recent_opportunities);

    let rows = stage_rows(&stats);
    if !rows.is_empty() {
        println!();
        for row in rows {
            println!(
                "{: <10} {: >5}  {}",
                row.label,
                row.count,
                format::currency(Some(row.total_amount))
            );
        }
    }
    Ok(())
}

pub(super) fn handle_attention_command(client: &ApiClient, json: bool) -> Result<()> {
    let deals = client
        .deals_needing_attention()
        .context("load deals needing attention")?;
    if json {
        return print_json(&deals, "deals needing attention");
    }
    if deals.is_empty() {
        println!("No deals need attention");
        return Ok(());
    }

    println!("{} need attention", format::plural(deals.len(), "deal"));
    for deal in &deals {
        let o = &deal.opportunity;
        println!(
            "{}  {}  {}  [{}]",
            o.id,
            o.name,
            format::currency(o.delta_average_arr),
            deal.tags.join(", ")
        );
    }
    Ok(())
}
