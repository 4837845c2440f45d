use std::collections::HashMap;

use anyhow::Result;
use request_http_parser::parser::Request;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::constant::{DEFAULT_LIMIT, DEFAULT_OFFSET, INTERNAL_ERROR, OK_RESPONSE};
use crate::error::SalesError;
use crate::product::repo::ProductRepository;
use crate::resp::{Envelope, Msg, paginate};
use crate::sale::{
    model::{NewSale, Sale, SaleForm},
    repo::SaleRepo,
};
use crate::utils::{des_from_str, ser_to_str};

/// Offset/limit window taken from the query string, defaulting to 0/10.
struct Page {
    offset: u32,
    limit: u32,
}

impl Page {
    fn from_params(params: Option<&HashMap<String, String>>) -> Result<Self, SalesError> {
        Ok(Self {
            offset: Self::field(params, "offset", DEFAULT_OFFSET)?,
            limit: Self::field(params, "limit", DEFAULT_LIMIT)?,
        })
    }

    fn field(
        params: Option<&HashMap<String, String>>,
        key: &str,
        default: u32,
    ) -> Result<u32, SalesError> {
        match params.and_then(|params| params.get(key)) {
            Some(raw) => raw.parse::<u32>().map_err(|_| SalesError::BadParam),
            None => Ok(default),
        }
    }
}

pub struct Service {
    product_repo: ProductRepository,
    sale_repo: SaleRepo,
}

impl Service {
    pub fn new(product_repo: ProductRepository, sale_repo: SaleRepo) -> Self {
        Self {
            product_repo,
            sale_repo,
        }
    }

    pub async fn get_sales<W: AsyncWrite + Unpin>(
        &self,
        request: &Request,
        writer: &mut W,
    ) -> Result<()> {
        let page = match Page::from_params(request.params.as_ref()) {
            Ok(page) => page,
            Err(err) => return write_rejection(err, writer).await,
        };
        match self.sale_repo.list(page.offset as i64, page.limit as i64).await {
            Ok((sales, total)) => {
                let envelope = paginate(Msg::RecordFound.format("sales", None), sales, total);
                send(writer, OK_RESPONSE, &ser_to_str(&envelope)?).await
            }
            Err(err) => write_store_error(err.into(), writer).await,
        }
    }

    pub async fn get_sales_by_product<W: AsyncWrite + Unpin>(
        &self,
        product_id: i32,
        request: &Request,
        writer: &mut W,
    ) -> Result<()> {
        let page = match Page::from_params(request.params.as_ref()) {
            Ok(page) => page,
            Err(err) => return write_rejection(err, writer).await,
        };
        match self
            .sale_repo
            .list_by_product(product_id, page.offset as i64, page.limit as i64)
            .await
        {
            Ok((sales, total)) => {
                let envelope = paginate(Msg::RecordFound.format("sales", None), sales, total);
                send(writer, OK_RESPONSE, &ser_to_str(&envelope)?).await
            }
            Err(err) => write_store_error(err.into(), writer).await,
        }
    }

    pub async fn create_sale<W: AsyncWrite + Unpin>(
        &self,
        request: &Request,
        writer: &mut W,
    ) -> Result<()> {
        let body = match &request.body {
            Some(body) => body,
            None => return write_rejection(SalesError::BadRequest, writer).await,
        };
        let form: SaleForm = match des_from_str(body) {
            Ok(form) => form,
            Err(err) => return write_rejection(err.into(), writer).await,
        };
        let product = match self.product_repo.get_by_id(form.product_id).await {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => {
                let envelope = Envelope::failure(
                    400,
                    Msg::RecordNotFound.format("product", Some(form.product_id)),
                );
                return send(writer, OK_RESPONSE, &ser_to_str(&envelope)?).await;
            }
            Err(err) => return write_store_error(err.into(), writer).await,
        };

        // Amount snapshots the price as read above; a concurrent price update
        // between this read and the insert is not guarded against.
        let new_sale = NewSale::new(&form, &product);
        let (id, created_at) = match self.sale_repo.insert(&new_sale).await {
            Ok(row) => row,
            Err(err) => return write_store_error(err.into(), writer).await,
        };

        let sale = Sale {
            id,
            quantity: new_sale.quantity,
            amount: new_sale.amount,
            product_id: Some(product.id),
            created_at,
            product: Some(product),
        };
        let envelope = Envelope::ok(Msg::SaleCreated.template().to_string(), Some(sale));
        send(writer, OK_RESPONSE, &ser_to_str(&envelope)?).await
    }
}

// Handled rejections ride the 200 status line, the code lives in the envelope
async fn write_rejection<W: AsyncWrite + Unpin>(err: SalesError, writer: &mut W) -> Result<()> {
    info!("{:?}", err);
    let envelope = Envelope::failure(400, err.to_string());
    send(writer, OK_RESPONSE, &ser_to_str(&envelope)?).await
}

async fn write_store_error<W: AsyncWrite + Unpin>(err: SalesError, writer: &mut W) -> Result<()> {
    info!("{:?}", err);
    let envelope = Envelope::failure(500, err.to_string());
    send(writer, INTERNAL_ERROR, &ser_to_str(&envelope)?).await
}

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, head: &str, body: &str) -> Result<()> {
    writer
        .write_all(format!("{}{}", head, body).as_bytes())
        .await?;
    writer.flush().await?;
    Ok(())
}
