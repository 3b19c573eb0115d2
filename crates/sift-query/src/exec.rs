//! Query execution: submit a composite query and count the results.

use sift_client::RecordService;
use tracing::debug;

use crate::{
    error::{QueryError, Result},
    predicate::CompositeQuery,
};

/// Submits a composite query scoped to `project` and reduces the
/// record stream to its cardinality.
///
/// The stream is consumed exactly once and never restarted. A failure
/// at submission or mid-pagination is returned as
/// [`QueryError::Execution`]; a partial count is never reported. The
/// call is read-only on the remote data and safe to repeat.
pub fn count_records(
    service: &dyn RecordService,
    project: &str,
    query: &CompositeQuery,
) -> Result<u64> {
    let body = query.to_body();
    debug!(project = project, "executing query {body}");

    let stream = service
        .search(project, &body)
        .map_err(|source| QueryError::Execution { source })?;

    let mut count = 0u64;
    for record in stream {
        record.map_err(|source| QueryError::Execution { source })?;
        count += 1;
    }

    debug!(project = project, count = count, "query complete");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        filter::QueryPolicy,
        predicate::Predicate,
        set::FilterSet,
        test_utils::FakeService,
    };

    #[test]
    fn test_counts_full_stream() {
        let service = FakeService::sample().with_records(7);
        let count = count_records(&service, "mvgen", &CompositeQuery::match_all()).unwrap();
        assert_eq!(count, 7);
    }

    #[test]
    fn test_empty_filter_set_counts_every_record() {
        let mut set = FilterSet::default();
        set.bind_schema(crate::test_utils::sample_schema());

        let service = FakeService::sample().with_records(5);
        let query = set.build_query(&QueryPolicy::default()).unwrap();
        let count = count_records(&service, "mvgen", &query).unwrap();

        assert_eq!(count, 5);
        assert_eq!(service.searches(), vec![("mvgen".to_string(), json!({}))]);
    }

    #[test]
    fn test_submitted_body_matches_query() {
        let service = FakeService::sample().with_records(1);
        let query = CompositeQuery::from(Predicate::new(
            "sample_id",
            Some("contains".to_string()),
            "ABC",
        ));

        count_records(&service, "mvgen", &query).unwrap();
        assert_eq!(
            service.searches(),
            vec![(
                "mvgen".to_string(),
                json!({"sample_id__contains": "ABC"})
            )]
        );
    }

    #[test]
    fn test_submission_failure_is_execution_error() {
        let mut service = FakeService::sample();
        service.fail_search = true;

        let err = count_records(&service, "mvgen", &CompositeQuery::match_all()).unwrap_err();
        assert!(matches!(err, QueryError::Execution { .. }));
    }

    #[test]
    fn test_mid_stream_failure_yields_no_partial_count() {
        let mut service = FakeService::sample().with_records(10);
        service.fail_mid_stream = true;

        let err = count_records(&service, "mvgen", &CompositeQuery::match_all()).unwrap_err();
        assert!(matches!(err, QueryError::Execution { .. }));
    }

    #[test]
    fn test_repeatable_with_identical_arguments() {
        let service = FakeService::sample().with_records(3);
        let query = CompositeQuery::match_all();

        let first = count_records(&service, "mvgen", &query).unwrap();
        let second = count_records(&service, "mvgen", &query).unwrap();
        assert_eq!(first, second);
    }
}
