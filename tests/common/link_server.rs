//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each path behaves like a kind of link found in the wild:
//!
//! | path            | HEAD | GET |
//! |-----------------|------|-----|
//! | `/ok`           | 200  | 200 |
//! | `/no-head`      | 405  | 200 |
//! | `/missing`      | 404  | 404 |
//! | `/gone`         | 410  | 410 |
//! | `/server-error` | 500  | 500 |
//! | `/redirect`     | 301 -> `/ok` | 301 -> `/ok` |
//! | `/slow`         | answers after 2 s | answers after 2 s |
//!
//! Anything else is 404.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Starts the server on a background thread and returns its base URL
/// (e.g. "http://127.0.0.1:12345"). Runs until the test process exits.
pub fn start() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || handle(stream));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on a port nobody listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut first_line = request.lines().next().unwrap_or("").split_whitespace();
    let method = first_line.next().unwrap_or("");
    let target = first_line.next().unwrap_or("/");
    let path = target.split('?').next().unwrap_or(target);

    let response = match (method, path) {
        (_, "/ok") => status_line(200, "OK", ""),
        ("HEAD", "/no-head") => status_line(405, "Method Not Allowed", ""),
        (_, "/no-head") => status_line(200, "OK", ""),
        (_, "/gone") => status_line(410, "Gone", ""),
        (_, "/server-error") => status_line(500, "Internal Server Error", ""),
        (_, "/redirect") => status_line(301, "Moved Permanently", "Location: /ok\r\n"),
        (_, "/slow") => {
            thread::sleep(Duration::from_secs(2));
            status_line(200, "OK", "")
        }
        _ => status_line(404, "Not Found", ""),
    };

    // The client may have given up already; nothing to do about it
    let _ = stream.write_all(response.as_bytes());
}

fn status_line(code: u16, reason: &str, extra_headers: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n{}\r\n",
        code, reason, extra_headers
    )
}
