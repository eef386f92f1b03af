//! Lookup tools against mocked HTTP services

use analyst_b3::{DailyClose, PriceHistory, ResearchConfig, get_tools_with};
use analyst_tools::{Tool, ToolRegistry};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NoPrices;

#[async_trait]
impl PriceHistory for NoPrices {
    async fn daily_closes(
        &self,
        _ticker: &str,
        _days: i64,
    ) -> analyst_b3::Result<Vec<DailyClose>> {
        Ok(Vec::new())
    }
}

fn registry(server: &MockServer) -> ToolRegistry {
    let config = ResearchConfig::default().with_mock_base(&server.uri());
    ToolRegistry::from_tools(get_tools_with(&config, Arc::new(NoPrices)).unwrap())
}

async fn call(registry: &ToolRegistry, tool: &str, params: Value) -> String {
    let tool = registry.get(tool).unwrap();
    match tool.execute(params).await.unwrap() {
        Value::String(text) => text,
        other => panic!("expected a string answer, got {other}"),
    }
}

#[tokio::test]
async fn ticker_lookup_returns_first_b3_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .and(query_param("q", "magalu"))
        .and(query_param("quotesCount", "15"))
        .and(query_param("newsCount", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quotes": [
                { "symbol": "MGLUY", "exchange": "PNK" },
                { "symbol": "MGLU3.SA", "exchange": "SAO" },
                { "symbol": "MGLU3F.SA", "exchange": "SAO" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "buscar_ticker_empresa",
        json!({ "empresa": "magalu" }),
    )
    .await;
    assert_eq!(answer, "MGLU3.SA");
}

#[tokio::test]
async fn ticker_lookup_without_b3_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quotes": [{ "symbol": "AAPL" }]
        })))
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "buscar_ticker_empresa",
        json!({ "empresa": "Apple" }),
    )
    .await;
    assert_eq!(answer, "Nenhum ticker .SA encontrado para 'Apple'.");
}

#[tokio::test]
async fn ticker_lookup_http_error_is_a_sentence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "buscar_ticker_empresa",
        json!({ "empresa": "vale" }),
    )
    .await;
    assert!(answer.starts_with("Erro ao buscar ticker no Yahoo Finance: "), "{answer}");
}

#[tokio::test]
async fn summary_follows_first_disambiguation_option() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "magalu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [{ "title": "Magalu" }] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts|pageprops"))
        .and(query_param("titles", "Magalu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "pages": [{ "title": "Magalu", "pageprops": { "disambiguation": "" } }] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "parse"))
        .and(query_param("page", "Magalu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parse": { "links": [
                { "ns": 14, "title": "Categoria:Empresas" },
                { "ns": 0, "title": "Magazine Luiza" },
                { "ns": 0, "title": "Magalu (cantora)" }
            ] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts|pageprops"))
        .and(query_param("titles", "Magazine Luiza"))
        .and(query_param("exsentences", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "pages": [{
                "title": "Magazine Luiza",
                "extract": "Magazine Luiza S.A. é uma empresa varejista brasileira."
            }] }
        })))
        .mount(&server)
        .await;

    let answer = call(&registry(&server), "resumo_empresa", json!({ "empresa": "magalu" })).await;
    assert_eq!(answer, "Magazine Luiza S.A. é uma empresa varejista brasileira.");
}

#[tokio::test]
async fn summary_without_search_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [] }
        })))
        .mount(&server)
        .await;

    let answer = call(&registry(&server), "resumo_empresa", json!({ "empresa": "xyzw" })).await;
    assert_eq!(answer, "Nenhuma página Wikipédia encontrada para 'xyzw'.");
}

#[tokio::test]
async fn summary_disambiguation_retry_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [{ "title": "Vale" }] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Vale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "pages": [{ "title": "Vale", "pageprops": { "disambiguation": "" } }] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parse": { "links": [{ "ns": 0, "title": "Vale (geografia)" }] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Vale (geografia)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "pages": [{ "title": "Vale (geografia)", "missing": true }] }
        })))
        .mount(&server)
        .await;

    let answer = call(&registry(&server), "resumo_empresa", json!({ "empresa": "vale" })).await;
    assert_eq!(answer, "Múltiplas páginas encontradas para 'vale'. Use o nome completo.");
}

fn feed(items: usize) -> String {
    let body: String = (0..items)
        .map(|i| {
            format!(
                "<item><title>Magalu notícia {i}</title>\
                 <link>https://news.example/{i}</link></item>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\"?><rss><channel><title>Google Notícias</title>{body}</channel></rss>"
    )
}

#[tokio::test]
async fn news_lists_at_most_twenty_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", "Magazine Luiza"))
        .and(query_param("hl", "pt-BR"))
        .and(query_param("gl", "BR"))
        .and(query_param("ceid", "BR:pt-419"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(feed(30)),
        )
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "noticias_empresa",
        json!({ "empresa": "Magazine Luiza" }),
    )
    .await;
    let entries: Vec<&str> = answer.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(entries.len(), 20);
    assert!(answer.starts_with("- Magalu notícia 0\n  https://news.example/0"));
}

#[tokio::test]
async fn news_empty_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed(0)))
        .mount(&server)
        .await;

    let answer = call(&registry(&server), "noticias_empresa", json!({ "empresa": "xyzw" })).await;
    assert_eq!(answer, "Nenhuma notícia encontrada.");
}

const DDG_PAGE: &str = concat!(
    "<html><body><table>\n",
    r#"<tr><td><a rel="nofollow" href="https://statusinvest.com.br/acoes/mglu3" "#,
    "class='result-link'>MGLU3 - Magazine Luiza - Status Invest</a></td></tr>\n",
    "<tr><td class='result-snippet'>Cotação de <b>MGLU3</b> hoje, ",
    "<b>Magazine Luiza S.A.</b></td></tr>\n",
    "</table></body></html>",
);

#[tokio::test]
async fn company_name_returns_search_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .and(query_param("q", "razão social oficial empresa magalu Brasil"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DDG_PAGE))
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "buscar_nome_empresa",
        json!({ "empresa": "magalu" }),
    )
    .await;
    assert!(answer.contains("Magazine Luiza S.A."), "{answer}");
}

#[tokio::test]
async fn company_name_without_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "buscar_nome_empresa",
        json!({ "empresa": "xyzw" }),
    )
    .await;
    assert_eq!(answer, "Nenhum resultado encontrado no DuckDuckGo para 'xyzw'.");
}

#[tokio::test]
async fn fallback_ticker_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .and(query_param(
            "q",
            "ticker magalu B3 site:yahoo.com OR site:statusinvest.com.br OR site:investing.com",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(DDG_PAGE))
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "busca_ticker_duckduckgo",
        json!({ "empresa": "magalu" }),
    )
    .await;
    assert_eq!(answer, "MGLU3.SA");
}

#[tokio::test]
async fn fallback_ticker_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let answer = call(
        &registry(&server),
        "busca_ticker_duckduckgo",
        json!({ "empresa": "magalu" }),
    )
    .await;
    assert!(answer.starts_with("Erro ao buscar ticker via DuckDuckGo: "), "{answer}");
}

#[tokio::test]
async fn blank_argument_is_answered_without_requests() {
    let server = MockServer::start().await;
    let registry = registry(&server);

    let answer = call(&registry, "noticias_empresa", json!({ "empresa": "   " })).await;
    assert_eq!(answer, "Informe um valor não vazio para 'empresa'.");
    assert!(server.received_requests().await.unwrap().is_empty());
}
