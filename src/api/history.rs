//! Payment History Endpoint

use serde::Deserialize;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::PaymentRecord;

const HISTORY_PATH: &str = "/api/paymenthistory/history";

/// The backend has answered with both a bare list and `{ history: [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryBody {
    List(Vec<PaymentRecord>),
    Wrapped { history: Vec<PaymentRecord> },
}

impl From<HistoryBody> for Vec<PaymentRecord> {
    fn from(body: HistoryBody) -> Self {
        match body {
            HistoryBody::List(records) | HistoryBody::Wrapped { history: records } => records,
        }
    }
}

impl ApiClient {
    /// Newest first as returned by the backend
    pub async fn payment_history(&self) -> AppResult<Vec<PaymentRecord>> {
        let body: HistoryBody = self.get_json(HISTORY_PATH).await?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode;
    use crate::error::AppError;

    fn parse_history(body: &str) -> AppResult<Vec<PaymentRecord>> {
        decode::<HistoryBody>(HISTORY_PATH, body).map(Into::into)
    }

    const RECORD: &str = r#"{"orderId":"o1","amount":350,"status":"paid","items":[]}"#;

    #[test]
    fn test_bare_list() {
        let records = parse_history(&format!("[{RECORD}]")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "paid");
    }

    #[test]
    fn test_wrapped_list() {
        let records = parse_history(&format!(r#"{{"history":[{RECORD},{RECORD}]}}"#)).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_other_shape_is_mismatch() {
        let err = parse_history(r#"{"orders":[]}"#).unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch { .. }));
    }
}
