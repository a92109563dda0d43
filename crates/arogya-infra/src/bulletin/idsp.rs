//! Bulletin index scraping and PDF download.

use std::sync::LazyLock;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use arogya_core::outbreak::BulletinSource;
use arogya_types::config::OutbreakConfig;
use arogya_types::error::{OutbreakError, UpstreamError};

const SERVICE: &str = "bulletin index";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const ORDINAL_SUFFIXES: [&str; 4] = ["th", "st", "nd", "rd"];

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("selector"));

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Find the href of the `year`/`week` bulletin on the index page.
///
/// The page carries one table: the first cell of each row is a year, the
/// second holds links labelled with ordinal week numbers (`1st`, `22nd`, ...).
pub fn find_week_link(html: &str, year: i32, week: u32) -> Result<String, OutbreakError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE)
        .next()
        .ok_or(OutbreakError::TableNotFound)?;

    let year_text = year.to_string();
    let row = table
        .select(&ROW)
        .find(|row| {
            row.select(&CELL)
                .next()
                .is_some_and(|cell| trimmed_text(cell) == year_text)
        })
        .ok_or(OutbreakError::YearNotFound(year))?;

    let labels = ORDINAL_SUFFIXES.map(|suffix| format!("{week}{suffix}"));
    row.select(&CELL)
        .nth(1)
        .and_then(|cell| {
            cell.select(&LINK)
                .find(|link| labels.contains(&trimmed_text(*link)))
        })
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string)
        .ok_or(OutbreakError::WeekNotFound { year, week })
}

/// Rewrite a Drive sharing link (`.../file/d/{id}/view`) into its direct
/// download form. Other URLs come back unchanged.
pub fn drive_download_url(url: &str) -> String {
    if !url.contains("drive.google.com") {
        return url.to_string();
    }
    let file_id = url
        .split_once("/d/")
        .and_then(|(_, rest)| rest.split(['/', '?', '#']).next())
        .filter(|id| !id.is_empty());

    match file_id {
        Some(id) => format!("https://drive.google.com/uc?export=download&id={id}"),
        None => url.to_string(),
    }
}

/// [`BulletinSource`] for the IDSP weekly outbreak bulletins.
pub struct IdspBulletinSource {
    client: reqwest::Client,
    index_url: reqwest::Url,
}

impl IdspBulletinSource {
    pub fn new(config: &OutbreakConfig) -> Result<Self, UpstreamError> {
        let index_url = reqwest::Url::parse(&config.bulletin_index_url)
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        Ok(Self { client, index_url })
    }

    async fn fetch_index(&self) -> Result<String, UpstreamError> {
        let response = self
            .client
            .get(self.index_url.clone())
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| UpstreamError::decode(SERVICE, e))
    }
}

impl BulletinSource for IdspBulletinSource {
    async fn locate(&self, year: i32, week: u32) -> Result<String, OutbreakError> {
        let html = self.fetch_index().await?;
        let href = find_week_link(&html, year, week)?;
        let resolved = self
            .index_url
            .join(&href)
            .map_err(|e| UpstreamError::decode(SERVICE, format!("bad bulletin link {href}: {e}")))?;

        let url = drive_download_url(resolved.as_str());
        tracing::debug!(year, week, %url, "bulletin located");
        Ok(url)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, OutbreakError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::transport("bulletin download", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OutbreakError::DownloadFailed(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport("bulletin download", e))?;
        Ok(bytes.to_vec())
    }
}
