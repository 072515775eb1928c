use anyhow::Result;
use indicator_scraper::{
    assemble::{assemble, AssembleOptions},
    config::{Catalog, IndicatorSpec},
    fetch::{CollectOptions, FetchSettings, HttpPageFetcher},
    persist::{persist, OutputFormat, PersistOutcome},
};
use std::{fs, time::Duration};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, code: &str, page: u32, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/country/all/indicator/{}", code)))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_merges_and_writes_csv() -> Result<()> {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "SP.POP.TOTL",
        1,
        r#"[{"page":1,"pages":2},[
            {"country":{"id":"FR","value":"France"},"date":"2020","value":67571107},
            {"country":{"id":"TD","value":"Chad"},"date":"2020","value":null}
        ]]"#,
    )
    .await;
    mount_page(
        &server,
        "SP.POP.TOTL",
        2,
        r#"[{"page":2,"pages":2},[
            {"country":{"id":"FR","value":"France"},"date":"2019","value":67248926},
            {"country":{"id":"XX","value":"Nowhere"},"date":"abc","value":1}
        ]]"#,
    )
    .await;
    mount_page(
        &server,
        "SI.POV.GINI",
        1,
        r#"[{"page":1,"pages":1},[
            {"country":{"id":"TD","value":"Chad"},"date":"2018","value":37.5},
            {"country":{"id":"FR","value":"France"},"date":"2020","value":30.7}
        ]]"#,
    )
    .await;
    // The third indicator is unknown to the API.
    Mock::given(method("GET"))
        .and(path("/v2/country/all/indicator/NOT.REAL"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let base_url = Url::parse(&format!("{}/v2", server.uri()))?;
    let fetcher = HttpPageFetcher::new(FetchSettings {
        timeout: Duration::from_secs(5),
        ..FetchSettings::new(base_url)
    })?;
    let catalog: Catalog = vec![
        IndicatorSpec::new("SP.POP.TOTL", "Population Total"),
        IndicatorSpec::new("SI.POV.GINI", "Gini Index"),
        IndicatorSpec::new("NOT.REAL", "Missing"),
    ]
    .into();
    let opts = AssembleOptions {
        collect: CollectOptions {
            page_delay: Duration::ZERO,
        },
        concurrency: 1,
    };

    let merged = assemble(&fetcher, &catalog, &opts).await;

    let tmp = tempfile::tempdir()?;
    let dest = tmp.path().join("world_data.csv");
    let outcome = persist(merged.as_ref(), &dest, OutputFormat::Csv)?;
    assert_eq!(outcome, PersistOutcome::Written { rows: 4 });

    let text = fs::read_to_string(&dest)?;
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "Country,Year,Population Total,Gini Index,Missing",
            "Chad,2018,,37.5,",
            "Chad,2020,,,",
            "France,2019,67248926,,",
            "France,2020,67571107,30.7,",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn empty_catalog_writes_nothing() -> Result<()> {
    let server = MockServer::start().await;
    let fetcher = HttpPageFetcher::new(FetchSettings::new(Url::parse(&server.uri())?))?;

    let catalog = Catalog::from(Vec::new());
    let merged = assemble(&fetcher, &catalog, &AssembleOptions::default()).await;
    assert!(merged.is_none());

    let tmp = tempfile::tempdir()?;
    let dest = tmp.path().join("world_data.csv");
    assert_eq!(
        persist(merged.as_ref(), &dest, OutputFormat::Csv)?,
        PersistOutcome::Skipped
    );
    assert!(!dest.exists());
    Ok(())
}
