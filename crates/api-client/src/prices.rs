// In crates/api-client/src/prices.rs

use app_config::PriceSettings;
use async_trait::async_trait;
use chrono::DateTime;
use core_types::{PricePoint, PriceSeries};
use reqwest::Url;

use crate::types::ChartEnvelope;
use crate::{Error, PriceSource, Result, RetryPolicy, build_http_client, send_for_text, with_retry};

/// Client for the Yahoo Finance chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooPriceClient {
    http_client: reqwest::Client,
    base_url: Url,
    range: String,
    interval: String,
    retry: RetryPolicy,
}

impl YahooPriceClient {
    pub fn new(settings: &PriceSettings, retry: RetryPolicy) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| Error::ClientBuildError(format!("invalid prices base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::ClientBuildError(format!(
                "prices base_url cannot carry a path: {base_url}"
            )));
        }

        Ok(Self {
            http_client: build_http_client(&retry)?,
            base_url,
            range: settings.range.clone(),
            interval: settings.interval.clone(),
            retry,
        })
    }

    /// The chart URL for `ticker`, which is percent-encoded as a single path segment.
    fn chart_url(&self, ticker: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::ClientBuildError(format!("prices base_url cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }

    async fn fetch_once(&self, ticker: &str) -> Result<PriceSeries> {
        let request = self
            .http_client
            .get(self.chart_url(ticker)?)
            .query(&[("range", self.range.as_str()), ("interval", self.interval.as_str())]);

        let (status, body) = send_for_text(request).await?;
        if status == 429 || status >= 500 {
            return Err(Error::HttpStatus { status, body });
        }
        parse_chart(ticker, &body)
    }
}

#[async_trait]
impl PriceSource for YahooPriceClient {
    fn name(&self) -> &'static str {
        "YahooFinance"
    }

    async fn daily_closes(&self, ticker: &str) -> Result<PriceSeries> {
        if ticker.trim().is_empty() {
            return Err(Error::InvalidInput("ticker must not be empty".into()));
        }

        let series = with_retry(&self.retry, "prices.chart", || self.fetch_once(ticker)).await?;
        tracing::debug!(ticker, points = series.len(), "Fetched daily closes.");
        Ok(series)
    }
}

/// Parses a chart body into a chronologically ordered close series.
///
/// Bars with a null, non-finite or non-positive close are skipped. Dates are taken in the exchange's local
/// time zone. A chart error object, a missing result or an empty series are all
/// reported as errors rather than as an empty series.
pub fn parse_chart(ticker: &str, body: &str) -> Result<PriceSeries> {
    let envelope: ChartEnvelope = serde_json::from_str(body).map_err(Error::DeserializationFailed)?;

    if let Some(error) = envelope.chart.error {
        return Err(if error.code.eq_ignore_ascii_case("Not Found") {
            Error::TickerNotFound(ticker.to_string())
        } else {
            Error::ApiError { code: error.code, msg: error.description }
        });
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| Error::TickerNotFound(ticker.to_string()))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let bars = result.timestamp.len().min(closes.len());
    let points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close.filter(|c| c.is_finite() && *c > 0.0)?;
            let date = DateTime::from_timestamp(ts + result.meta.gmt_offset, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect();

    if points.len() < bars {
        tracing::debug!(ticker, skipped = bars - points.len(), "Skipped bars without a usable close.");
    }
    if points.is_empty() {
        return Err(Error::EmptySeries(ticker.to_string()));
    }

    Ok(PriceSeries::new(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const AAPL: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "currency": "USD", "gmtoffset": -14400},
                "timestamp": [1714656600, 1714743000, 1714829400, 1715002200],
                "indicators": {"quote": [{
                    "open": [172.5, 186.6, null, 182.3],
                    "close": [173.0, 183.38, null, 181.71]
                }]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_skips_null_closes_and_uses_exchange_dates() {
        let series = parse_chart("AAPL", AAPL).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(series.points()[2].date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());

        let recent = series.recent_change().unwrap();
        assert!((recent - (181.71 - 183.38) / 183.38).abs() < 1e-12);
    }

    #[test]
    fn test_parse_not_found_is_ticker_error() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        assert!(matches!(parse_chart("NOPE", body), Err(Error::TickerNotFound(t)) if t == "NOPE"));
    }

    #[test]
    fn test_parse_other_chart_error_is_api_error() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Bad Request", "description": "Invalid input - interval=7x is not supported"}}}"#;
        assert!(matches!(parse_chart("AAPL", body), Err(Error::ApiError { .. })));
    }

    #[test]
    fn test_parse_without_bars_is_empty_series() {
        let body = r#"{"chart": {"result": [{
            "meta": {"symbol": "AAPL", "gmtoffset": 0},
            "indicators": {"quote": [{}]}
        }], "error": null}}"#;
        assert!(matches!(parse_chart("AAPL", body), Err(Error::EmptySeries(_))));
    }

    #[test]
    fn test_parse_skips_unusable_closes_on_old_bars() {
        let body = r#"{"chart": {"result": [{
            "meta": {"gmtoffset": 0},
            "timestamp": [1714608000, 1714694400, 1714780800, 1714867200],
            "indicators": {"quote": [{"close": [0.0, -3.5, 100.0, 102.0]}]}
        }], "error": null}}"#;

        let series = parse_chart("X", body).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].date, NaiveDate::from_ymd_opt(2024, 5, 4).unwrap());
        assert!((series.recent_change().unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_parse_only_zero_closes_is_empty_series() {
        let body = r#"{"chart": {"result": [{
            "meta": {"gmtoffset": 0},
            "timestamp": [1714608000],
            "indicators": {"quote": [{"close": [0.0]}]}
        }], "error": null}}"#;
        assert!(matches!(parse_chart("X", body), Err(Error::EmptySeries(_))));
    }

    #[test]
    fn test_parse_accepts_meta_without_symbol() {
        let body = r#"{"chart": {"result": [{
            "timestamp": [1714608000, 1714694400],
            "indicators": {"quote": [{"close": [10.0, 11.0]}]}
        }], "error": null}}"#;
        assert_eq!(parse_chart("X", body).unwrap().len(), 2);
    }

    #[test]
    fn test_chart_url_escapes_ticker() {
        let settings = PriceSettings {
            base_url: "https://query1.finance.yahoo.com/".into(),
            ..PriceSettings::default()
        };
        let client = YahooPriceClient::new(&settings, RetryPolicy::default()).unwrap();

        assert_eq!(
            client.chart_url("AAPL").unwrap().as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/AAPL"
        );
        assert_eq!(
            client.chart_url("BRK/B?x#y").unwrap().as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/BRK%2FB%3Fx%23y"
        );
    }

    #[test]
    fn test_invalid_base_url_is_build_error() {
        let settings = PriceSettings {
            base_url: "not a url".into(),
            ..PriceSettings::default()
        };
        assert!(matches!(
            YahooPriceClient::new(&settings, RetryPolicy::default()),
            Err(Error::ClientBuildError(_))
        ));
    }

    #[test]
    fn test_parse_missing_result_is_ticker_error() {
        let body = r#"{"chart": {"result": [], "error": null}}"#;
        assert!(matches!(parse_chart("AAPL", body), Err(Error::TickerNotFound(_))));
    }
}
