//! CLI output for `pep show`, `pep source`, and `pep list`.
//!
//! [`PepView`] is the serializable shape of a record, used for `--json`.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::client::PepClient;
use crate::models::{PepType, Status, Topic};
use crate::pep::Pep;
use crate::query::{self, PepFilter};

/// Metadata of one PEP, in the shape printed by `pep show --json`.
#[derive(Debug, Clone, Serialize)]
pub struct PepView {
    pub number: u32,
    pub title: String,
    pub authors: BTreeSet<String>,
    pub discussions_to: Option<String>,
    pub status: Status,
    #[serde(rename = "type")]
    pub pep_type: PepType,
    pub topics: Vec<Topic>,
    pub created: NaiveDate,
    pub python_version: Option<String>,
    pub post_history: Option<String>,
    pub resolution: Option<String>,
    pub requires: Option<String>,
    pub replaces: Option<String>,
    pub superseded_by: Option<String>,
    pub url: String,
    /// Present only once the body has been fetched.
    pub source_url: Option<String>,
}

impl From<&Pep> for PepView {
    fn from(pep: &Pep) -> Self {
        let owned = |s: Option<&str>| s.map(str::to_string);
        Self {
            number: pep.number(),
            title: pep.title().to_string(),
            authors: pep.authors().clone(),
            discussions_to: owned(pep.discussions_to()),
            status: pep.status(),
            pep_type: pep.pep_type(),
            topics: pep.topics().to_vec(),
            created: pep.created(),
            python_version: owned(pep.python_version()),
            post_history: owned(pep.post_history()),
            resolution: owned(pep.resolution()),
            requires: owned(pep.requires()),
            replaces: owned(pep.replaces()),
            superseded_by: owned(pep.superseded_by()),
            url: pep.url().to_string(),
            source_url: pep.source_if_fetched().map(|s| s.url.clone()),
        }
    }
}

/// CLI entry point for `pep show`.
pub fn run_show(client: &PepClient, number: u32, json: bool) -> Result<()> {
    let pep = client.pep(number)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&PepView::from(&pep))?);
        return Ok(());
    }

    println!("--- {} ---", pep);
    println!("title:          {}", pep.title());
    println!(
        "authors:        {}",
        pep.authors().iter().cloned().collect::<Vec<_>>().join(", ")
    );
    println!("status:         {}", pep.status());
    println!("type:           {}", pep.pep_type());
    if !pep.topics().is_empty() {
        let topics: Vec<&str> = pep.topics().iter().map(Topic::as_str).collect();
        println!("topics:         {}", topics.join(", "));
    }
    println!("created:        {}", pep.created());
    let optional = [
        ("discussions_to", pep.discussions_to()),
        ("python_version", pep.python_version()),
        ("post_history", pep.post_history()),
        ("resolution", pep.resolution()),
        ("requires", pep.requires()),
        ("replaces", pep.replaces()),
        ("superseded_by", pep.superseded_by()),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            println!("{:<15} {}", format!("{}:", name), value);
        }
    }
    println!("url:            {}", pep.url());

    Ok(())
}

/// CLI entry point for `pep source`.
pub fn run_source(client: &PepClient, number: u32, url_only: bool) -> Result<()> {
    let pep = client.pep(number)?;

    if url_only {
        println!("{}", pep.source_url()?);
        return Ok(());
    }

    let body = pep.source()?;
    eprintln!("source: {}", pep.source_url()?);
    print!("{}", body);
    if !body.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// CLI entry point for `pep list`.
pub fn run_list(client: &PepClient, filter: &PepFilter) -> Result<()> {
    let selection = query::select(client.store(), &client.fetcher(), filter);

    for pep in &selection.peps {
        println!(
            "{:>5}  {:<12} {:<16} {}",
            pep.number(),
            pep.status().as_str(),
            pep.pep_type().as_str(),
            pep.title()
        );
    }

    if !selection.skipped.is_empty() {
        eprintln!(
            "Warning: skipped {} index entries that failed validation",
            selection.skipped.len()
        );
    }
    println!("{} PEPs", selection.peps.len());

    Ok(())
}
