use oppdesk::api::OpportunityApi;
use oppdesk::form::OpportunityForm;
use oppdesk::format;
use oppdesk::model::{Opportunity, OpportunityFilters, OpportunityInput};
use oppdesk::nav::{Navigator, SubmitOutcome};
use oppdesk::screens::{DetailRow, DetailView};

use crate::cli_commands::records::ListArgs;

use super::*;

pub(super) fn handle_list_command(client: &ApiClient, args: ListArgs) -> Result<()> {
    let filters = OpportunityFilters {
        stage: args.stage,
        account_name: args.account_name,
        min_amount: args.min_amount,
        max_amount: args.max_amount,
        limit: args.limit,
        skip: args.skip,
    };
    let rows = client
        .list_opportunities(&filters)
        .context("list opportunities")?;

    if args.json {
        return print_json(&rows, "opportunity list");
    }
    if rows.is_empty() {
        println!("No opportunities");
        return Ok(());
    }

    println!(
        "{: <36}  {: <28}  {: <20}  {: >12}  {: >5}  {: <12}",
        "ID", "NAME", "ACCOUNT", "DELTA ARR", "STAGE", "CLOSE"
    );
    for o in &rows {
        println!(
            "{: <36}  {: <28}  {: <20}  {: >12}  {: >5}  {: <12}",
            o.id,
            fit(&o.name, 28),
            fit(&format::text(o.account_name.as_deref()), 20),
            format::currency(o.delta_average_arr),
            o.stage_number.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            format::date(o.close_date.as_deref()),
        );
    }
    Ok(())
}

pub(super) fn handle_show_command(client: &ApiClient, id: &str, json: bool) -> Result<()> {
    let record = client
        .get_opportunity(id)
        .with_context(|| format!("fetch opportunity {}", id))?;
    if json {
        return print_json(&record, "opportunity");
    }

    let view = DetailView::new(record);
    println!("{}", view.record().name);
    println!("id: {}", view.record().id);
    let print_rows = |rows: Vec<DetailRow>| {
        for row in rows {
            println!("{: <22}{}", format!("{}:", row.label), row.value);
        }
    };
    print_rows(view.key_metrics());
    print_rows(view.fields());
    println!("Description:");
    println!("  {}", view.description());
    print_rows(view.timestamps());
    Ok(())
}

pub(super) fn handle_create_command(client: &ApiClient, sets: &[String], json: bool) -> Result<()> {
    let mut form = OpportunityForm::create();
    apply_assignments(&mut form, sets)?;
    let input = validated(&mut form)?;

    let mut nav = Navigator::new();
    nav.create();
    let saved = save(&mut nav, client, &input)?;

    if json {
        print_json(&saved, "opportunity")
    } else {
        println!("Created {} ({})", saved.name, saved.id);
        Ok(())
    }
}

pub(super) fn handle_update_command(
    client: &ApiClient,
    id: &str,
    sets: &[String],
    json: bool,
) -> Result<()> {
    let record = client
        .get_opportunity(id)
        .with_context(|| format!("fetch opportunity {}", id))?;

    let mut form = OpportunityForm::edit(&record);
    apply_assignments(&mut form, sets)?;
    let input = validated(&mut form)?;

    let mut nav = Navigator::new();
    nav.edit(record);
    let saved = save(&mut nav, client, &input)?;

    if json {
        print_json(&saved, "opportunity")
    } else {
        println!("Updated {} ({})", saved.name, saved.id);
        Ok(())
    }
}

pub(super) fn handle_delete_command(client: &ApiClient, id: &str, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("refusing to delete {} without --yes", id);
    }
    client
        .delete_opportunity(id)
        .with_context(|| format!("delete opportunity {}", id))?;
    println!("Deleted {}", id);
    Ok(())
}

fn apply_assignments(form: &mut OpportunityForm, sets: &[String]) -> Result<()> {
    for assignment in sets {
        form.assign(assignment)?;
    }
    Ok(())
}

/// Runs the form rules; on failure prints each problem and sends nothing.
fn validated(form: &mut OpportunityForm) -> Result<OpportunityInput> {
    if let Some(input) = form.prepare_submit() {
        return Ok(input);
    }
    let errors = form.errors();
    for (field, msg) in errors {
        eprintln!("{}: {}", field.key(), msg);
    }
    anyhow::bail!(
        "{} invalid; nothing was sent",
        format::plural(errors.len(), "field")
    )
}

fn save(nav: &mut Navigator, client: &ApiClient, input: &OpportunityInput) -> Result<Opportunity> {
    match nav.submit(client, input) {
        SubmitOutcome::Saved(saved) => Ok(saved),
        SubmitOutcome::Failed(err) => Err(anyhow::Error::new(err).context("save opportunity")),
        SubmitOutcome::Ignored => anyhow::bail!("no form to submit"),
    }
}

fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out = s.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('~');
    out
}
