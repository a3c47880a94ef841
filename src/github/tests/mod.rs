//! Unit tests for repository aggregation.

use mockall::Sequence;
use mockall::predicate::function;
use rstest::rstest;

use super::models::test_support::{contributor, issue, pull_request, sample_stats};
use super::{
    MockRepositoryDataGateway, RepoDataError, RepositoryAggregator, RepositoryLocator,
    ResourceOutcome,
};

fn is_hello_world(locator: &RepositoryLocator) -> bool {
    locator.owner().as_str() == "octocat" && locator.repository().as_str() == "Hello-World"
}

/// Gateway expecting the four fetches once each, in order.
fn setup_ordered_gateway(
    issues: Result<Vec<super::Issue>, RepoDataError>,
    pull_requests: Result<Vec<super::PullRequest>, RepoDataError>,
) -> MockRepositoryDataGateway {
    let mut gateway = MockRepositoryDataGateway::new();
    let mut sequence = Sequence::new();

    gateway
        .expect_repository_stats()
        .with(function(is_hello_world))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(sample_stats(42)));

    gateway
        .expect_contributors()
        .with(function(is_hello_world))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(vec![contributor("alice", 10)]));

    gateway
        .expect_issues()
        .with(function(is_hello_world))
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move |_| issues);

    gateway
        .expect_pull_requests()
        .with(function(is_hello_world))
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move |_| pull_requests);

    gateway
}

#[tokio::test]
async fn loads_all_resources_in_order() {
    let gateway = setup_ordered_gateway(
        Ok(vec![issue(1, 0, Some(2))]),
        Ok(vec![pull_request(7, 1, Some(3))]),
    );

    let bundle = RepositoryAggregator::new(&gateway)
        .load("octocat", "Hello-World")
        .await
        .expect("aggregation should succeed");

    assert_eq!(bundle.stats.stargazers_count, 42, "stars mismatch");
    assert_eq!(bundle.contributors.len(), 1, "contributor count mismatch");
    assert_eq!(bundle.issues.items().len(), 1, "issue count mismatch");
    assert_eq!(
        bundle.pull_requests.items().first().map(|pr| pr.number),
        Some(7),
        "pull request mismatch"
    );
}

#[tokio::test]
async fn normalises_url_shaped_identifiers_before_fetching() {
    let gateway = setup_ordered_gateway(Ok(vec![]), Ok(vec![]));

    let bundle = RepositoryAggregator::new(&gateway)
        .load("", "https://github.com/octocat/Hello-World.git/")
        .await
        .expect("aggregation should succeed");

    assert_eq!(bundle.stats.full_name, "octocat/Hello-World");
}

#[tokio::test]
async fn optional_issue_failure_yields_unavailable_issues() {
    let gateway = setup_ordered_gateway(
        Err(RepoDataError::NoResponse),
        Ok(vec![pull_request(1, 0, None)]),
    );

    let bundle = RepositoryAggregator::new(&gateway)
        .load("octocat", "Hello-World")
        .await
        .expect("optional failure should not abort");

    assert_eq!(
        bundle.issues,
        ResourceOutcome::Unavailable(RepoDataError::NoResponse),
        "issues should be unavailable"
    );
    assert!(bundle.issues.items().is_empty());
    assert!(bundle.pull_requests.is_available());
}

#[tokio::test]
async fn both_optional_failures_still_return_bundle() {
    let gateway = setup_ordered_gateway(
        Err(RepoDataError::Forbidden),
        Err(RepoDataError::RateLimited { rate_limit: None }),
    );

    let bundle = RepositoryAggregator::new(&gateway)
        .load("octocat", "Hello-World")
        .await
        .expect("optional failures should not abort");

    assert_eq!(bundle.issues.error(), Some(&RepoDataError::Forbidden));
    assert!(
        bundle
            .pull_requests
            .error()
            .is_some_and(RepoDataError::is_rate_limited),
        "pull requests should carry the rate limit error"
    );
}

#[rstest]
#[case::not_found(RepoDataError::NotFound)]
#[case::rate_limited(RepoDataError::RateLimited { rate_limit: None })]
#[case::no_response(RepoDataError::NoResponse)]
#[tokio::test]
async fn mandatory_stats_failure_stops_further_requests(#[case] failure: RepoDataError) {
    let mut gateway = MockRepositoryDataGateway::new();
    let expected = failure.clone();
    gateway
        .expect_repository_stats()
        .times(1)
        .return_once(move |_| Err(failure));
    gateway.expect_contributors().times(0);
    gateway.expect_issues().times(0);
    gateway.expect_pull_requests().times(0);

    let error = RepositoryAggregator::new(&gateway)
        .load("octocat", "Hello-World")
        .await
        .expect_err("stats failure should abort");

    assert_eq!(error, expected);
}

#[tokio::test]
async fn mandatory_contributors_failure_stops_further_requests() {
    let mut gateway = MockRepositoryDataGateway::new();
    gateway
        .expect_repository_stats()
        .times(1)
        .returning(|_| Ok(sample_stats(1)));
    gateway
        .expect_contributors()
        .times(1)
        .returning(|_| Err(RepoDataError::Unauthorized));
    gateway.expect_issues().times(0);
    gateway.expect_pull_requests().times(0);

    let error = RepositoryAggregator::new(&gateway)
        .load("octocat", "Hello-World")
        .await
        .expect_err("contributors failure should abort");

    assert_eq!(error, RepoDataError::Unauthorized);
}

#[rstest]
#[case::empty_owner("", "Hello-World")]
#[case::empty_repo("octocat", "")]
#[case::only_suffix("octocat", ".git")]
#[tokio::test]
async fn invalid_identifier_makes_no_requests(#[case] owner: &str, #[case] repo: &str) {
    let mut gateway = MockRepositoryDataGateway::new();
    gateway.expect_repository_stats().times(0);
    gateway.expect_contributors().times(0);
    gateway.expect_issues().times(0);
    gateway.expect_pull_requests().times(0);

    let error = RepositoryAggregator::new(&gateway)
        .load(owner, repo)
        .await
        .expect_err("identifier should be rejected");

    assert_eq!(error, RepoDataError::InvalidIdentifier);
}

#[tokio::test]
async fn contributors_are_sorted_by_contributions_descending() {
    let mut gateway = MockRepositoryDataGateway::new();
    gateway
        .expect_repository_stats()
        .returning(|_| Ok(sample_stats(0)));
    gateway.expect_contributors().returning(|_| {
        Ok(vec![
            contributor("carol", 2),
            contributor("alice", 10),
            contributor("dave", 2),
            contributor("bob", 5),
        ])
    });
    gateway.expect_issues().returning(|_| Ok(vec![]));
    gateway.expect_pull_requests().returning(|_| Ok(vec![]));

    let bundle = RepositoryAggregator::new(&gateway)
        .load("octocat", "Hello-World")
        .await
        .expect("aggregation should succeed");

    let logins: Vec<_> = bundle
        .contributors
        .iter()
        .map(|c| c.login.as_str())
        .collect();
    assert_eq!(logins, vec!["alice", "bob", "carol", "dave"]);
}
