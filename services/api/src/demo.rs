use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use pic_portal::error::AppError;
use pic_portal::portal::{
    candidates_from_path, filter_by_name, toggle_sort, CallerIdentity, CandidateId,
    CandidateRecord, MemoryPortalStore, ReviewPortal, SelectionSet, SortMode,
};

use crate::infra::sample_store;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Intake roster CSV export to seed the candidate pool from
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Name filter applied to the roster before selection
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Prospect ids to shortlist (defaults to every listed prospect)
    #[arg(long)]
    pub(crate) select: Vec<String>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster_csv,
        query,
        select,
    } = args;

    let store = match roster_csv {
        Some(path) => {
            let records = candidates_from_path(&path)?;
            println!(
                "Seeded {} roster rows from {}",
                records.len(),
                path.display()
            );
            let pic = records.iter().find(|record| record.is_pic).cloned();
            let store = Arc::new(MemoryPortalStore::new());
            store.seed_candidates(records);
            if let Some(pic) = pic {
                store.set_caller(Some(CallerIdentity {
                    member_id: pic.id.clone(),
                }));
                println!("Signed in as {} (PIC)", pic.full_name);
            }
            store
        }
        None => {
            let store = sample_store();
            store.set_caller(Some(CallerIdentity {
                member_id: CandidateId("pat".to_string()),
            }));
            println!("Seeded the sample candidate pool; signed in as Pat Ibarra (PIC)");
            store
        }
    };

    let portal = ReviewPortal::new(store);
    let ctx = portal.gate().resolve().await;
    println!(
        "Resolved access: is_pic={}, is_active={}",
        ctx.is_pic, ctx.is_active
    );

    let roster = portal.roster().reviewable(&ctx).await;
    if roster.is_empty() {
        println!("You are not on PIC.");
        return Ok(());
    }

    println!("\nRoster by name");
    render_roster(&roster);

    let (by_score, mode) = toggle_sort(roster, SortMode::ByName);
    println!("\nRoster by {}", mode.label());
    render_roster(&by_score);

    let filtered = match query.as_deref() {
        Some(query) => {
            let hits = filter_by_name(&by_score, query);
            println!("\nFilter '{}' matches {} prospect(s)", query, hits.len());
            hits
        }
        None => by_score,
    };

    let mut selection = SelectionSet::new();
    if select.is_empty() {
        for record in &filtered {
            selection.toggle(record.id.clone());
        }
    } else {
        for id in select {
            selection.toggle(CandidateId(id));
        }
    }
    println!("\nShortlisted {} prospect(s)", selection.len());

    if let Some(first) = filtered.first() {
        if let Some(application_ref) = &first.application_ref {
            match portal.details().load(application_ref, &first.id).await {
                Some(detail) => println!(
                    "Dossier for {}: {} case study(ies), {} interview(s)",
                    first.full_name,
                    detail.case_studies.len(),
                    detail.interviews.len()
                ),
                None => println!("Dossier for {}: application unavailable", first.full_name),
            }
        }
    }

    portal.delibs().submit(&selection).await?;

    let committed = portal.delibs().roster().await;
    println!("\nDeliberation set ({} committed)", committed.len());
    render_roster(&committed);

    Ok(())
}

fn render_roster(records: &[CandidateRecord]) {
    for record in records {
        let score = record
            .total_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("- {} <{}> score {}", record.full_name, record.email, score);
    }
}
