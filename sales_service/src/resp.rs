use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub enum Msg {
    SaleCreated,
    RecordFound,
    RecordNotFound,
}

impl Msg {
    pub fn template(self) -> &'static str {
        match self {
            Msg::SaleCreated => "The sale has been created successfully",
            Msg::RecordFound => "The {resource} has been found successfully",
            Msg::RecordNotFound => "The {resource} with id '{id}' has not been found",
        }
    }

    pub fn format(self, resource: &str, id: Option<i32>) -> String {
        let mut message = self.template().replace("{resource}", resource);
        if let Some(id) = id {
            message = message.replace("{id}", &id.to_string());
        }
        message
    }
}

// Unmapped codes pass through with status "OK"
pub fn status_for(code: u16) -> &'static str {
    match code {
        400 => "BadRequest",
        500 => "InternalServerError",
        _ => "OK",
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub status: String,
    pub code: u16,
    pub message: String,
    pub error: Option<Value>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(code: u16, message: String, data: Option<T>) -> Self {
        Self {
            status: status_for(code).to_string(),
            code,
            message,
            error: None,
            data,
        }
    }

    pub fn ok(message: String, data: Option<T>) -> Self {
        Self::new(200, message, data)
    }
}

impl Envelope<Value> {
    pub fn failure(code: u16, message: String) -> Self {
        Self::new(code, message, None)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PaginatedEnvelope<T> {
    pub status: String,
    pub code: u16,
    pub message: String,
    pub error: Option<Value>,
    pub data: Vec<T>,
    pub total_records: i64,
}

// The pagination helper never signals errors, status is fixed to OK
pub fn paginate<T>(message: String, data: Vec<T>, total_records: i64) -> PaginatedEnvelope<T> {
    PaginatedEnvelope {
        status: "OK".to_string(),
        code: 200,
        message,
        error: None,
        data,
        total_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_derived_from_code() {
        assert_eq!(status_for(200), "OK");
        assert_eq!(status_for(400), "BadRequest");
        assert_eq!(status_for(500), "InternalServerError");
        // unmapped codes keep the code and report OK
        assert_eq!(status_for(302), "OK");
    }

    #[test]
    fn not_found_message_substitutes_requested_id() {
        assert_eq!(
            Msg::RecordNotFound.format("product", Some(999)),
            "The product with id '999' has not been found"
        );
    }

    #[test]
    fn found_message_substitutes_resource() {
        assert_eq!(
            Msg::RecordFound.format("sales", None),
            "The sales has been found successfully"
        );
    }

    #[test]
    fn envelope_shape() {
        let env = Envelope::ok(Msg::SaleCreated.template().to_string(), Some(json!({"id": 1})));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "OK",
                "code": 200,
                "message": "The sale has been created successfully",
                "error": null,
                "data": {"id": 1},
            })
        );
    }

    #[test]
    fn failure_envelope_rides_code_in_body() {
        let env = Envelope::failure(400, Msg::RecordNotFound.format("product", Some(2)));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["status"], "BadRequest");
        assert_eq!(value["code"], 400);
        assert_eq!(value["error"], Value::Null);
        assert_eq!(value["data"], Value::Null);
    }

    #[test]
    fn paginated_envelope_shape() {
        let env = paginate(
            Msg::RecordFound.format("sales", None),
            vec![json!({"id": 1})],
            12,
        );
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "OK",
                "code": 200,
                "message": "The sales has been found successfully",
                "error": null,
                "data": [{"id": 1}],
                "total_records": 12,
            })
        );
    }
}
