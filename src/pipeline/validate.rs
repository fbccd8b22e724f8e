// src/pipeline/validate.rs

//! Response shape validation.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::PollResponse;

/// Extract the homework list and server timestamp from a decoded response.
///
/// An empty list is valid and only logged; it is not an error.
pub fn extract(response: &Value) -> Result<PollResponse> {
    let object = response
        .as_object()
        .ok_or_else(|| AppError::schema("response is not a JSON object"))?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| AppError::schema("response has no \"homeworks\" field"))?
        .as_array()
        .ok_or_else(|| AppError::schema("\"homeworks\" is not a list"))?;

    let current_date = object
        .get("current_date")
        .ok_or_else(|| AppError::schema("response has no \"current_date\" field"))?
        .as_i64()
        .ok_or_else(|| AppError::schema("\"current_date\" is not an integer"))?;

    if homeworks.is_empty() {
        log::debug!("No new homework statuses");
    }

    Ok(PollResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_valid_response() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        });

        let extracted = extract(&response).unwrap();
        assert_eq!(extracted.homeworks.len(), 1);
        assert_eq!(extracted.current_date, 1000);
    }

    #[test]
    fn test_extract_empty_list_is_ok() {
        let response = json!({"homeworks": [], "current_date": 2000});
        let extracted = extract(&response).unwrap();
        assert!(extracted.homeworks.is_empty());
        assert_eq!(extracted.current_date, 2000);
    }

    #[test]
    fn test_missing_homeworks() {
        let response = json!({"current_date": 1000});
        assert!(matches!(extract(&response), Err(AppError::Schema(_))));
    }

    #[test]
    fn test_homeworks_not_a_list() {
        for homeworks in [json!({"hw1": "approved"}), json!("hw1"), json!(null)] {
            let response = json!({"homeworks": homeworks, "current_date": 1000});
            assert!(matches!(extract(&response), Err(AppError::Schema(_))));
        }
    }

    #[test]
    fn test_missing_or_mistyped_current_date() {
        let response = json!({"homeworks": []});
        assert!(matches!(extract(&response), Err(AppError::Schema(_))));

        let response = json!({"homeworks": [], "current_date": "yesterday"});
        assert!(matches!(extract(&response), Err(AppError::Schema(_))));

        let response = json!({"homeworks": [], "current_date": 10.5});
        assert!(matches!(extract(&response), Err(AppError::Schema(_))));
    }

    #[test]
    fn test_response_not_an_object() {
        let response = json!([{"homework_name": "hw1", "status": "approved"}]);
        assert!(matches!(extract(&response), Err(AppError::Schema(_))));
    }
}
