use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::api::PokeApiClient;
use crate::models::{Identifier, Pokemon};

use super::{QueryClient, QueryKey, QueryPolicy, QueryState};

pub fn list_key() -> QueryKey {
    QueryKey::new(["pokemon", "list"])
}

pub fn single_key(identifier: &Identifier) -> QueryKey {
    QueryKey::new(["pokemon".to_string(), "single".to_string(), identifier.to_string()])
}

/// Cached, retried reads over `PokeApiClient`.
/// Clone is cheap and clones share their caches.
#[derive(Clone, Debug)]
pub struct PokemonQueries {
    api: PokeApiClient,
    policy: QueryPolicy,
    list_cache: QueryClient<Vec<Pokemon>>,
    single_cache: QueryClient<Pokemon>,
}

impl PokemonQueries {
    pub fn new(api: PokeApiClient) -> Self {
        Self {
            api,
            policy: QueryPolicy::default(),
            list_cache: QueryClient::new(),
            single_cache: QueryClient::new(),
        }
    }

    pub fn with_policy(mut self, policy: QueryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The twelve-pokemon page
    pub async fn list(&self) -> Result<Vec<Pokemon>> {
        self.list_cache
            .fetch(&list_key(), &self.policy, self.list_fetcher())
            .await
    }

    fn list_fetcher(&self) -> impl FnMut() -> BoxFuture<'static, Result<Vec<Pokemon>>> {
        let api = self.api.clone();
        move || {
            let api = api.clone();
            async move { api.fetch_list().await }.boxed()
        }
    }

    /// One pokemon by id or name. Disabled (no request, `Ok(None)`) while the
    /// identifier is missing, empty, or 0.
    pub async fn single(&self, identifier: Option<&Identifier>) -> Result<Option<Pokemon>> {
        let identifier = match identifier {
            Some(identifier) if !identifier.is_absent() => identifier,
            _ => {
                debug!("Single pokemon query disabled without an identifier");
                return Ok(None);
            }
        };

        let api = self.api.clone();
        let requested = identifier.clone();
        let fetcher = move || {
            let api = api.clone();
            let requested = requested.clone();
            async move { api.fetch_one(&requested).await }.boxed()
        };

        self.single_cache
            .fetch(&single_key(identifier), &self.policy, fetcher)
            .await
            .map(Some)
    }

    /// Fetch the list again even if the cached one is fresh
    pub async fn refresh_list(&self) -> Result<Vec<Pokemon>> {
        self.list_cache
            .refetch(&list_key(), &self.policy, self.list_fetcher())
            .await
    }

    /// Last fetched list, even if stale
    pub fn cached_list(&self) -> Option<Vec<Pokemon>> {
        self.list_cache.get_data(&list_key())
    }

    pub fn list_state(&self) -> Option<QueryState<Vec<Pokemon>>> {
        self.list_cache.state(&list_key())
    }

    pub fn cached_single(&self, identifier: &Identifier) -> Option<Pokemon> {
        self.single_cache.get_data(&single_key(identifier))
    }

    /// Mark every pokemon query stale
    pub fn invalidate_all(&self) {
        let prefix = QueryKey::new(["pokemon"]);
        self.list_cache.invalidate(&prefix);
        self.single_cache.invalidate(&prefix);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::client_tests::{details_json, mount_pokedex};
    use crate::query::RetryDelay;

    fn queries(server: &MockServer) -> PokemonQueries {
        let api = PokeApiClient::with_base_url(&server.uri()).unwrap();
        PokemonQueries::new(api)
            .with_policy(QueryPolicy::default().with_retry_delay(RetryDelay::Fixed(Duration::from_millis(10))))
    }

    async fn request_count(server: &MockServer) -> usize {
        server.received_requests().await.unwrap().len()
    }

    #[test]
    fn test_keys() {
        assert_eq!(list_key().to_string(), "pokemon/list");
        assert_eq!(single_key(&Identifier::Id(25)).to_string(), "pokemon/single/25");
        assert!(single_key(&Identifier::from("ditto")).starts_with(&QueryKey::new(["pokemon", "single"])));
    }

    #[tokio::test]
    async fn test_repeated_list_reads_use_cache() {
        let mock_server = MockServer::start().await;
        mount_pokedex(&mock_server).await;
        let queries = queries(&mock_server);

        let first = queries.list().await.unwrap();
        assert_eq!(first.len(), 12);
        assert_eq!(request_count(&mock_server).await, 13);

        let second = queries.list().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(request_count(&mock_server).await, 13);

        let state = queries.list_state().unwrap();
        assert!(!state.is_stale);
        assert_eq!(state.age_display(), "just now");
    }

    #[tokio::test]
    async fn test_refresh_list_goes_to_network() {
        let mock_server = MockServer::start().await;
        mount_pokedex(&mock_server).await;
        let queries = queries(&mock_server);

        queries.list().await.unwrap();
        queries.refresh_list().await.unwrap();
        assert_eq!(request_count(&mock_server).await, 26);
    }

    #[tokio::test]
    async fn test_concurrent_list_reads_share_requests() {
        let mock_server = MockServer::start().await;
        mount_pokedex(&mock_server).await;
        let queries = queries(&mock_server);

        let (first, second) = tokio::join!(queries.list(), queries.list());

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(request_count(&mock_server).await, 13);
    }

    #[tokio::test]
    async fn test_single_without_identifier_makes_no_requests() {
        let mock_server = MockServer::start().await;
        let queries = queries(&mock_server);

        assert_eq!(queries.single(None).await.unwrap(), None);
        assert_eq!(queries.single(Some(&Identifier::from(""))).await.unwrap(), None);
        assert_eq!(queries.single(Some(&Identifier::Id(0))).await.unwrap(), None);

        assert_eq!(request_count(&mock_server).await, 0);
    }

    #[tokio::test]
    async fn test_single_is_cached_per_identifier() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon/25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(details_json(25, "pikachu")))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(details_json(25, "pikachu")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let queries = queries(&mock_server);
        let by_id = Identifier::Id(25);
        let by_name = Identifier::from("pikachu");

        let first = queries.single(Some(&by_id)).await.unwrap().unwrap();
        let again = queries.single(Some(&by_id)).await.unwrap().unwrap();
        let named = queries.single(Some(&by_name)).await.unwrap().unwrap();

        assert_eq!(first, again);
        assert_eq!(named.id, 25);
        assert_eq!(queries.cached_single(&by_id), Some(first));
    }

    #[tokio::test]
    async fn test_list_retries_transient_failures() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        mount_pokedex(&mock_server).await;

        let queries = queries(&mock_server);
        let list = queries.list().await.unwrap();

        assert_eq!(list.len(), 12);
        // Two failed index calls, then one index call and twelve details
        assert_eq!(request_count(&mock_server).await, 15);
    }

    #[tokio::test]
    async fn test_single_gives_up_after_retries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon/missingno"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .expect(4)
            .mount(&mock_server)
            .await;

        let queries = queries(&mock_server);
        let err = queries
            .single(Some(&Identifier::from("missingno")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API Error: 404 Not Found - Not Found");
        assert_eq!(queries.cached_single(&Identifier::from("missingno")), None);
    }

    #[tokio::test]
    async fn test_invalidate_all_marks_everything_stale() {
        let mock_server = MockServer::start().await;
        mount_pokedex(&mock_server).await;
        let queries = queries(&mock_server);

        queries.list().await.unwrap();
        queries.invalidate_all();

        assert!(queries.list_state().unwrap().is_stale);
        assert!(queries.cached_list().is_some());
    }
}
