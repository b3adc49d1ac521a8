//! Builders for on-disk test archives shaped like the upstream exports.

use encoding_rs::WINDOWS_1250;
use std::{
    collections::HashMap,
    io::{Cursor, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::schema::{column_index, COLUMNS};

/// One `;`-separated record with every column empty except `values`.
pub fn csv_line(values: &[(&str, &str)]) -> String {
    let mut fields = vec![String::new(); COLUMNS.len()];
    for (name, value) in values {
        let idx = column_index(name).unwrap_or_else(|| panic!("unknown column {name}"));
        fields[idx] = value.to_string();
    }
    fields.join(";")
}

/// Zip bytes holding the given members, each encoded as Windows-1250 with
/// CRLF line ends.
pub fn zip_bytes(members: &[(&str, Vec<String>)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (member, lines) in members {
        let mut text = lines.join("\r\n");
        if !text.is_empty() {
            text.push_str("\r\n");
        }
        let (bytes, _, unmappable) = WINDOWS_1250.encode(&text);
        assert!(!unmappable, "fixture text not representable in windows-1250");
        zip.start_file(*member, options).expect("start member");
        zip.write_all(&bytes).expect("write member");
    }
    zip.finish().expect("finish archive").into_inner()
}

/// Write `dir/name` as a zip built by [`zip_bytes`].
pub fn write_archive(dir: &Path, name: &str, members: &[(&str, Vec<String>)]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, zip_bytes(members)).expect("write fixture archive");
    path
}

/// Minimal HTTP/1.1 server answering GETs from a fixed route table, 404
/// otherwise. Returns `http://127.0.0.1:PORT` (no trailing slash).
pub async fn serve(routes: Vec<(String, Vec<u8>)>) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let routes: Arc<HashMap<String, Vec<u8>>> = Arc::new(routes.into_iter().collect());

    tokio::spawn(async move {
        while let Ok((mut sock, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut req = Vec::new();
                let mut buf = [0u8; 1024];
                while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => req.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&req);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = match routes.get(&path) {
                    Some(body) => ("200 OK", body.clone()),
                    None => ("404 Not Found", Vec::new()),
                };
                let header = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = sock.write_all(header.as_bytes()).await;
                let _ = sock.write_all(&body).await;
                let _ = sock.shutdown().await;
            });
        }
    });

    Ok(format!("http://{addr}"))
}

/// A small archive set for three regions: two yearly archives, PAK has a
/// duplicate id inside one archive.
pub fn write_sample_archives(dir: &Path) {
    let rows = |prefix: &str, n: usize| -> Vec<String> {
        (0..n)
            .map(|i| {
                csv_line(&[
                    ("p1", &format!("{prefix}{i:04}")),
                    ("p2a", "2019-05-01"),
                    ("p14", &format!("{}", i * 100)),
                    ("d", "-600000,5"),
                    ("e", "-1100000,25"),
                ])
            })
            .collect()
    };
    let mut pak = rows("17", 3);
    pak.push(pak[0].clone());
    write_archive(
        dir,
        "datagis2019.zip",
        &[("17.csv", pak), ("18.csv", rows("18", 2)), ("19.csv", rows("19", 1))],
    );
    write_archive(
        dir,
        "datagis2020.zip",
        &[("17.csv", rows("27", 2)), ("18.csv", rows("28", 4)), ("19.csv", rows("29", 0))],
    );
}
