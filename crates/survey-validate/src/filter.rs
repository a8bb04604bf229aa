//! Age-group filtering.

use std::borrow::Cow;
use std::collections::BTreeSet;

use polars::prelude::*;
use survey_common::any_to_string;
use survey_model::{ALL_AGES_LABEL, AgeGroupSelector, SurveySchema};
use tracing::{debug, warn};

use crate::error::{Result, ValidateError};

/// Narrows `df` to the rows the selector keeps.
///
/// [`AgeGroupSelector::All`] borrows `df` unchanged. A group selector builds a
/// new frame whose age group, compared as text, equals the selected value; no
/// match gives a zero-row frame with the same columns.
pub fn filter_by_age_group<'a>(
    df: &'a DataFrame,
    schema: &SurveySchema,
    selector: &AgeGroupSelector,
) -> Result<Cow<'a, DataFrame>> {
    let AgeGroupSelector::Group(wanted) = selector else {
        return Ok(Cow::Borrowed(df));
    };
    let column = age_group_column(df, schema)?;

    let keep: Vec<bool> = (0..df.height())
        .map(|idx| {
            column
                .get(idx)
                .is_ok_and(|value| any_to_string(value) == *wanted)
        })
        .collect();
    let mask = BooleanChunked::from_slice("age_filter".into(), &keep);
    let filtered = df.filter(&mask)?;

    debug!(
        age_group = %wanted,
        rows = filtered.height(),
        source_rows = df.height(),
        "filtered by age group"
    );
    Ok(Cow::Owned(filtered))
}

/// Sorted distinct age-group values, for the filter menu.
///
/// Nulls and blank values are skipped.
pub fn age_groups(df: &DataFrame, schema: &SurveySchema) -> Result<Vec<String>> {
    let column = age_group_column(df, schema)?;
    let mut groups = BTreeSet::new();
    for idx in 0..column.len() {
        let label = any_to_string(column.get(idx)?);
        if !label.trim().is_empty() {
            groups.insert(label);
        }
    }
    Ok(groups.into_iter().collect())
}

/// Maps a menu label to a selector for this table.
///
/// Same as [`AgeGroupSelector::from_label`], but warns when the data itself
/// holds a group named like the all-ages label, since that group is then
/// unreachable through the label.
pub fn selector_for_label(
    df: &DataFrame,
    schema: &SurveySchema,
    label: Option<&str>,
) -> AgeGroupSelector {
    let selector = AgeGroupSelector::from_label(label);
    if selector.is_all() && label.is_some() {
        let shadowed = age_groups(df, schema)
            .is_ok_and(|groups| groups.iter().any(|group| group == ALL_AGES_LABEL));
        if shadowed {
            warn!(
                label = ALL_AGES_LABEL,
                "data contains an age group named like the all-ages label; selecting all rows"
            );
        }
    }
    selector
}

fn age_group_column<'a>(df: &'a DataFrame, schema: &SurveySchema) -> Result<&'a Column> {
    df.column(&schema.age_group)
        .map_err(|_| ValidateError::MissingColumn {
            column: schema.age_group.clone(),
        })
}
