#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value;
use uuid::Uuid;
use wms_catalog_export::api::{AccessToken, CatalogApi, Credentials};
use wms_catalog_export::model::ProductPage;
use wms_catalog_export::{ExportError, Result};

/// Decodes a products page the same way the HTTP client does.
pub fn page(json: Value) -> ProductPage {
    serde_json::from_value(json).expect("page decoded")
}

/// A products page holding one single-SKU product per code.
pub fn page_of(codes: &[&str], has_next: bool) -> ProductPage {
    let items: Vec<Value> = codes
        .iter()
        .map(|code| {
            serde_json::json!({
                "codigo": code,
                "descricaoComercial": format!("Produto {code}"),
                "skus": [{"descricao": "UN", "situacao": "ATIVO"}]
            })
        })
        .collect();
    page(serde_json::json!({ "items": items, "hasNext": has_next }))
}

pub enum PageScript {
    Page(ProductPage),
    Status(u16),
}

/// In-process [`CatalogApi`] answering from a fixed script and recording the
/// page requests it receives.
pub struct ScriptedApi {
    token: std::result::Result<String, u16>,
    pages: Vec<PageScript>,
    pub requests: RefCell<Vec<(u32, u32)>>,
}

impl ScriptedApi {
    pub fn new(pages: Vec<PageScript>) -> Self {
        Self {
            token: Ok("token".to_string()),
            pages,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting_auth(status: u16) -> Self {
        Self {
            token: Err(status),
            pages: Vec::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Ok(token.to_string());
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|(page, _)| *page).collect()
    }
}

impl CatalogApi for ScriptedApi {
    fn acquire_token(&self, _credentials: &Credentials) -> Result<AccessToken> {
        match &self.token {
            Ok(token) => Ok(AccessToken::new(token.clone())),
            Err(status) => Err(ExportError::AuthRejected { status: *status }),
        }
    }

    fn fetch_page(
        &self,
        _token: &AccessToken,
        _unit_id: &Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<ProductPage> {
        self.requests.borrow_mut().push((page, page_size));
        match self.pages.get(page as usize - 1) {
            Some(PageScript::Page(response)) => Ok(response.clone()),
            Some(PageScript::Status(status)) => Err(ExportError::PageRejected {
                page,
                status: *status,
            }),
            None => panic!("unexpected request for page {page}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Minimal HTTP/1.1 server answering one connection per scripted response,
/// in order, then shutting down.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("stub server bound");
        let base_url = format!("http://{}", listener.local_addr().expect("local address"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request(&mut stream);
                recorded.lock().expect("requests lock").push(request);

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn read_request(stream: &mut std::net::TcpStream) -> RecordedRequest {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).expect("request body");

    RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}
