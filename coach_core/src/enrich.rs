//! Plan post-processing: attach catalog media to generated plan items.
//!
//! Each item's free-text `name` goes through the catalog matcher and the
//! item's `media` field is overwritten with the match's media reference,
//! or `null` when there is no confident match. Item count, order and all
//! other fields are left untouched.

use crate::config::EnrichConfig;
use crate::matcher::{CatalogMatcher, MatchPolicy};
use crate::{Catalog, GeneratedPlan, PlanItem};
use serde_json::Value;

/// Knobs for plan enrichment beyond media attachment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Fill a missing or empty `description` from the matched entry
    pub backfill_descriptions: bool,
}

impl From<&EnrichConfig> for EnrichOptions {
    fn from(config: &EnrichConfig) -> Self {
        Self {
            backfill_descriptions: config.backfill_descriptions,
        }
    }
}

/// Summary of one enrichment pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub total: usize,
    /// Items that ended up with a media reference
    pub matched: usize,
}

impl EnrichReport {
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }
}

/// Attach media to every item of `plan` using `catalog` and `policy`
pub fn attach_media(plan: &mut GeneratedPlan, catalog: &Catalog, policy: &MatchPolicy) -> EnrichReport {
    attach_media_with(
        plan,
        &CatalogMatcher::new(catalog, *policy),
        &EnrichOptions::default(),
    )
}

/// Attach media to every item of `plan` with explicit options
pub fn attach_media_with(
    plan: &mut GeneratedPlan,
    matcher: &CatalogMatcher<'_>,
    options: &EnrichOptions,
) -> EnrichReport {
    let kind = plan.kind();
    if matcher.catalog().kind != kind {
        tracing::warn!(
            "Matching a {} plan against the {} catalog",
            kind,
            matcher.catalog().kind
        );
    }

    let mut report = EnrichReport::default();
    for item in plan.items_mut() {
        report.total += 1;
        if enrich_item(item, matcher, options) {
            report.matched += 1;
        }
    }

    tracing::info!(
        "Attached media to {}/{} {} items",
        report.matched,
        report.total,
        kind
    );
    report
}

/// Enrich a single item; returns whether media was attached
///
/// A matched entry that has no media of its own leaves `media` null and
/// does not count as attached.
pub fn enrich_item(item: &mut PlanItem, matcher: &CatalogMatcher<'_>, options: &EnrichOptions) -> bool {
    let entry = item.name().and_then(|name| matcher.find(name));

    item.media = entry.and_then(|e| e.media.clone());

    let Some(entry) = entry else {
        return false;
    };

    if options.backfill_descriptions && description_is_blank(item) {
        if let Some(desc) = &entry.description {
            item.extra
                .insert("description".to_string(), Value::String(desc.clone()));
        }
    }

    item.media.is_some()
}

fn description_is_blank(item: &PlanItem) -> bool {
    match item.extra.get("description") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
