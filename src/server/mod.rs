use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

pub mod api;
pub mod routes;

pub fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("gauntlet server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream) -> std::io::Result<()> {
    let request = read_request(stream)?;
    if request.is_empty() {
        return Ok(());
    }

    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(method, path, body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

/// Read one request, honoring Content-Length so large turn payloads arrive
/// whole rather than being cut at the first socket read.
fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut raw: Vec<u8> = Vec::with_capacity(16_384);
    let mut chunk = [0_u8; 16_384];

    loop {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..bytes_read]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text
                .lines()
                .take_while(|line| !line.is_empty())
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if raw.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}
