//! 端到端测试工具：本地 HTTP 桩服务和记录型视图

#![allow(dead_code)]

use std::sync::Mutex;

use guidepost_core::{BoundingBox, DestinationRow, FieldContent, Region, SidebarView};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server that answers exactly one request with a JSON body.
pub struct StubServer {
    pub base_url: String,
    /// Resolves to the request line of the request it served.
    pub request_line: JoinHandle<String>,
}

pub async fn serve_once(status: u16, body: &str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    let body = body.to_string();

    let request_line = tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return String::new();
        };

        let mut buf = Vec::new();
        let mut chunk = [0_u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }

        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&buf)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    StubServer {
        base_url: format!("http://{addr}"),
        request_line,
    }
}

#[derive(Default)]
struct Recorded {
    visible: Vec<Region>,
    fields: Vec<(String, FieldContent)>,
    groups: Vec<String>,
    rows: Vec<DestinationRow>,
    framed: Vec<BoundingBox>,
}

/// View that records the final state of every region, field and row.
#[derive(Default)]
pub struct RecordingView(Mutex<Recorded>);

impl RecordingView {
    fn with<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
        let mut guard = self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn visible(&self) -> Vec<Region> {
        self.with(|r| {
            let mut v = r.visible.clone();
            v.sort();
            v
        })
    }

    pub fn field(&self, name: &str) -> Option<FieldContent> {
        self.with(|r| {
            r.fields
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| c.clone())
        })
    }

    pub fn group_visible(&self, group: &str) -> bool {
        self.with(|r| r.groups.iter().any(|g| g == group))
    }

    pub fn rows(&self) -> Vec<DestinationRow> {
        self.with(|r| r.rows.clone())
    }

    pub fn framed(&self) -> Vec<BoundingBox> {
        self.with(|r| r.framed.clone())
    }
}

impl SidebarView for RecordingView {
    fn set_region_visible(&self, region: Region, visible: bool) {
        self.with(|r| {
            r.visible.retain(|v| *v != region);
            if visible {
                r.visible.push(region);
            }
        });
    }

    fn clear_field(&self, field: &str) {
        self.with(|r| r.fields.retain(|(n, _)| n != field));
    }

    fn fill_field(&self, field: &str, content: FieldContent) {
        self.with(|r| {
            r.fields.retain(|(n, _)| n != field);
            r.fields.push((field.to_string(), content));
        });
    }

    fn set_group_visible(&self, group: &str, visible: bool) {
        self.with(|r| {
            r.groups.retain(|g| g != group);
            if visible {
                r.groups.push(group.to_string());
            }
        });
    }

    fn clear_destinations(&self) {
        self.with(|r| r.rows.clear());
    }

    fn append_destination(&self, row: &DestinationRow) {
        self.with(|r| r.rows.push(row.clone()));
    }

    fn fit_view(&self, bbox: BoundingBox) {
        self.with(|r| r.framed.push(bbox));
    }
}
