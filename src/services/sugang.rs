use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, REFERER, USER_AGENT};
use reqwest::Client;

use crate::config::Config;
use crate::entity::sea_orm_active_enums::Term;
use crate::error::{AppError, AppResult};

/// Excel download endpoint of the course registration site
const EXCEL_DOWNLOAD_PATH: &str = "/sugang/cc/cc100InterfaceExcel.action";

/// Fixed query of the excel download form: every filter cleared, one page of 9999 rows
const EXCEL_DOWNLOAD_PARAMS: &str = concat!(
    "seeMore=%EB%8D%94%EB%B3%B4%EA%B8%B0&",
    "srchBdNo=&srchCamp=&srchOpenSbjtFldCd=&srchCptnCorsFg=&",
    "srchCurrPage=1&",
    "srchExcept=&srchGenrlRemoteLtYn=&srchIsEngSbjt=&",
    "srchIsPendingCourse=&srchLsnProgType=&srchMrksApprMthdChgPosbYn=&srchMrksGvMthd=&",
    "srchOpenUpDeptCd=&srchOpenMjCd=&srchOpenPntMax=&srchOpenPntMin=&srchOpenSbjtDayNm=&",
    "srchOpenSbjtNm=&srchOpenSbjtTm=&srchOpenSbjtTmNm=&srchOpenShyr=&srchOpenSubmattCorsFg=&",
    "srchOpenSubmattFgCd1=&srchOpenSubmattFgCd2=&srchOpenSubmattFgCd3=&srchOpenSubmattFgCd4=&",
    "srchOpenSubmattFgCd5=&srchOpenSubmattFgCd6=&srchOpenSubmattFgCd7=&srchOpenSubmattFgCd8=&",
    "srchOpenSubmattFgCd9=&srchOpenDeptCd=&srchOpenUpSbjtFldCd=&",
    "srchPageSize=9999&",
    "srchProfNm=&srchSbjtCd=&srchSbjtNm=&srchTlsnAplyCapaCntMax=&srchTlsnAplyCapaCntMin=&",
    "srchTlsnRcntMax=&srchTlsnRcntMin=&",
    "workType=EX"
);

/// Language of one export variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLanguage {
    Korean,
    English,
}

impl ExportLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            ExportLanguage::Korean => "ko",
            ExportLanguage::English => "en",
        }
    }
}

/// Headers forwarded from the caller so the upstream sees an existing session
#[derive(Debug, Clone, Default)]
pub struct ForwardedHeaders {
    pub cookie: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// One export download
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub year: i32,
    pub term: Term,
    pub language: ExportLanguage,
    pub headers: ForwardedHeaders,
}

/// Source of raw course export payloads
#[async_trait]
pub trait ExportFetcher: Send + Sync {
    /// Download the spreadsheet bytes for one (year, term, language)
    async fn fetch(&self, request: &ExportRequest) -> AppResult<Vec<u8>>;
}

/// reqwest-backed client for the registration site's excel export
pub struct SugangClient {
    client: Client,
    base_url: String,
    default_user_agent: String,
}

impl SugangClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.sugang_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.sugang_base_url.trim_end_matches('/').to_string(),
            default_user_agent: config.sugang_user_agent.clone(),
        })
    }

    fn export_url(&self, request: &ExportRequest) -> String {
        format!(
            "{}{}?{}&srchLanguage={}&srchOpenSchyy={}&srchOpenShtm={}",
            self.base_url,
            EXCEL_DOWNLOAD_PATH,
            EXCEL_DOWNLOAD_PARAMS,
            request.language.code(),
            request.year,
            request.term.sugang_code(),
        )
    }
}

#[async_trait]
impl ExportFetcher for SugangClient {
    async fn fetch(&self, request: &ExportRequest) -> AppResult<Vec<u8>> {
        let url = self.export_url(request);
        let headers = &request.headers;

        // The body is a spreadsheet, but the content type varies, so accept broadly
        let mut builder = self
            .client
            .get(&url)
            .header(ACCEPT, "text/html,application/vnd.ms-excel,*/*")
            .header(
                USER_AGENT,
                headers
                    .user_agent
                    .as_deref()
                    .unwrap_or(&self.default_user_agent),
            );
        if let Some(cookie) = &headers.cookie {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(referer) = &headers.referer {
            builder = builder.header(REFERER, referer);
        }

        tracing::info!(
            year = request.year,
            term = %request.term,
            lang = request.language.code(),
            "Downloading course export"
        );

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalFetch(format!(
                "Course export request failed with status {}",
                status
            )));
        }

        let bytes = response.bytes().await?;
        tracing::debug!(size = bytes.len(), "Course export downloaded");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiration_hours: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            sugang_base_url: "https://sugang.example.com/".to_string(),
            sugang_timeout_secs: 5,
            sugang_user_agent: "test-agent".to_string(),
        }
    }

    #[test]
    fn test_export_url_carries_year_term_and_language() {
        let client = SugangClient::new(&test_config()).unwrap();
        let url = client.export_url(&ExportRequest {
            year: 2025,
            term: Term::Fall,
            language: ExportLanguage::English,
            headers: ForwardedHeaders::default(),
        });

        assert!(url.starts_with("https://sugang.example.com/sugang/cc/cc100InterfaceExcel.action?"));
        assert!(url.contains("srchLanguage=en"));
        assert!(url.contains("srchOpenSchyy=2025"));
        assert!(url.contains("srchOpenShtm=U000200002U000300001"));
        assert!(url.contains("srchPageSize=9999"));
        assert!(url.ends_with("srchOpenShtm=U000200002U000300001"));
    }
}
