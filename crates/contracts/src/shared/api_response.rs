use serde::{Deserialize, Serialize};

/// Конверт ответа REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Успешный конверт без данных считается ошибкой
    pub fn into_result(self) -> Result<T, String> {
        if !self.success {
            return Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| "Request failed".to_string()));
        }
        self.data
            .ok_or_else(|| self.message.unwrap_or_else(|| "Empty response".to_string()))
    }
}

/// Ответ списка с пагинацией
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::ok(5).into_result(), Ok(5));
        assert_eq!(
            ApiResponse::<i32>::fail("Boom").into_result(),
            Err("Boom".to_string())
        );
    }

    #[test]
    fn test_missing_data_field() {
        let resp: ApiResponse<Vec<i32>> =
            serde_json::from_str(r#"{"success":true,"message":"Deleted"}"#).unwrap();
        assert_eq!(resp.into_result(), Err("Deleted".to_string()));
    }
}
