//! Accumulating validation of listing configuration.

use super::violations::ConfigViolation;
use super::ListingConfig;
use crate::core::rows_options;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single rule or of the whole rule set.
pub type ConfigValidation = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Run all rules against `config`, accumulating every violation.
pub fn validate(config: &ListingConfig) -> ConfigValidation {
    let mut checks: Vec<ConfigValidation> = Vec::new();

    checks.push(if config.posts_per_page == 0 {
        Validation::fail(ConfigViolation::ZeroPostsPerPage)
    } else {
        Validation::success(())
    });

    checks.push(if rows_options(config.posts_per_page).is_none() {
        Validation::fail(ConfigViolation::RowsOptionsOverflow {
            posts_per_page: config.posts_per_page,
        })
    } else {
        Validation::success(())
    });

    if let Some(domains) = config.custom_domain_map() {
        let mut slugs: Vec<&String> = domains
            .iter()
            .filter(|(_, domain)| domain.trim().is_empty())
            .map(|(slug, _)| slug)
            .collect();
        slugs.sort();
        for slug in slugs {
            checks.push(Validation::fail(ConfigViolation::EmptyCustomDomain {
                slug: slug.clone(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Collapse a validation into a plain list of violations.
pub fn violations(result: ConfigValidation) -> Vec<ConfigViolation> {
    match result {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
