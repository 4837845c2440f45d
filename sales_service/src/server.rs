use anyhow::Result;

use request_http_parser::parser::{Method::GET, Method::POST};
use sqlx::{Pool, Postgres};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot::Receiver;
use tracing::info;

use crate::constant;
use crate::mdw::Middleware;
use crate::product::repo::ProductRepository;
use crate::sale::repo::SaleRepo;
use crate::svc::Service;
use std::sync::Arc;

const SALES_BY_PRODUCT_PREFIX: &str = "/sales-by-product/";

pub struct Server {
    svc: Arc<Service>,
}

impl Server {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            svc: Arc::new(Service::new(
                ProductRepository::new(pool.clone()),
                SaleRepo::new(pool),
            )),
        }
    }

    pub async fn start(self, mut shutdown_rx: Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:7878").await?;
        println!("Server running on http://127.0.0.1:7878");

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let (stream, _) = conn?;
                    let svc = Arc::clone(&self.svc);
                    tokio::spawn(async move {
                        crate::logging::thread_logging(constant::LOGGING_INCOMING_REQUEST);
                        if let Err(e) = Self::handle_client(stream, &svc).await {
                            eprintln!("Connection error: {}", e);
                        }
                    });
                },
                _ = &mut shutdown_rx => {
                    println!("shutting down ...");
                    break;
                }
            }
        }
        Ok(())
    }

    async fn handle_client(mut stream: TcpStream, svc: &Arc<Service>) -> Result<()> {
        let request = match Middleware::new(&mut stream).await {
            Ok(request) => request,
            Err(e) => {
                info!("error {}", e);
                return Ok(());
            }
        };
        let (_, mut writer) = stream.split();

        //Router
        match (&request.method, request.path.as_str()) {
            (GET, "/sales") => svc.get_sales(&request, &mut writer).await?,
            (POST, "/sale") => svc.create_sale(&request, &mut writer).await?,
            (GET, path) if path.starts_with(SALES_BY_PRODUCT_PREFIX) => {
                match product_id_from_path(path) {
                    Some(product_id) => {
                        svc.get_sales_by_product(product_id, &request, &mut writer)
                            .await?
                    }
                    None => {
                        writer
                            .write_all(
                                format!("{}{}", constant::BAD_REQUEST, "400 Bad Request")
                                    .as_bytes(),
                            )
                            .await?;
                    }
                }
            }
            _ => {
                writer
                    .write_all(format!("{}{}", constant::NOT_FOUND, "404 Not Found").as_bytes())
                    .await?;
            }
        };
        Ok(())
    }
}

fn product_id_from_path(path: &str) -> Option<i32> {
    path.strip_prefix(SALES_BY_PRODUCT_PREFIX)
        .and_then(|raw| raw.parse::<i32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_product_id() {
        assert_eq!(product_id_from_path("/sales-by-product/42"), Some(42));
    }

    #[test]
    fn rejects_non_integer_segment() {
        assert_eq!(product_id_from_path("/sales-by-product/widget"), None);
        assert_eq!(product_id_from_path("/sales-by-product/"), None);
        assert_eq!(product_id_from_path("/sales-by-product/1/extra"), None);
    }
}
