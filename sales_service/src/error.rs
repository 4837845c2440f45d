use std::{error::Error, fmt::Debug};

#[derive(thiserror::Error)]
pub enum SalesError {
    #[error("Serde error")]
    Serde(#[from] serde_json::Error),

    #[error("Query error")]
    Database(#[from] sqlx::Error),

    #[error("Request body error")]
    BadRequest,

    #[error("Request parameter error")]
    BadParam,
}

impl Debug for SalesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_appends_source_chain() {
        let serde_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err = SalesError::from(serde_err);
        let debug = format!("{:?}", err);
        assert!(debug.starts_with("Serde error (Caused by: "));
    }

    #[test]
    fn unit_variants_have_no_source() {
        assert_eq!(format!("{:?}", SalesError::BadRequest), "Request body error");
        assert_eq!(
            format!("{:?}", SalesError::BadParam),
            "Request parameter error"
        );
    }
}
