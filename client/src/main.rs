use log::{error, info};
use std::net::TcpStream;
use std::time::Instant;
use buftransport::{BufferedTransport, StreamTransport, Transport};

const DATA_SIZE: usize = 1024 * 1024; // 1 MB, must match the server
const DEFAULT_ADDR: &str = "127.0.0.1:7878";
const CHUNK_SIZE: usize = 64;
const BUFFER_SIZE: usize = 8 * 1024;

fn main() {
    env_logger::init();

    let addr = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_string());
    info!("Connecting to server at {}...", addr);
    let stream = TcpStream::connect(&addr).expect("Failed to connect to server");
    info!("Connected!");

    let reader = stream.try_clone().expect("Failed to clone stream");
    let mut transport = BufferedTransport::with_capacity(StreamTransport::new(reader, stream), BUFFER_SIZE)
        .expect("Invalid buffer size");

    let data: Vec<u8> = (0..DATA_SIZE).map(|i| (i % 251) as u8).collect();

    info!("Sending {} KB in {}-byte writes...", DATA_SIZE / 1024, CHUNK_SIZE);
    let start = Instant::now();
    for chunk in data.chunks(CHUNK_SIZE) {
        transport.write(chunk).expect("Failed to send data");
    }
    transport.flush().expect("Failed to flush");
    let elapsed = start.elapsed();
    let speed = (DATA_SIZE as f64 / 1024.0) / elapsed.as_secs_f64();

    info!("=== Send Complete ===");
    info!("Total sent: {} KB", DATA_SIZE / 1024);
    info!("Time: {:.2} seconds", elapsed.as_secs_f64());
    info!("Speed: {:.2} KB/s", speed);

    info!("Receiving echo from server...");
    let start = Instant::now();
    let mut recv_data = vec![0u8; DATA_SIZE];
    transport.read_exact(&mut recv_data).expect("Failed to receive data");
    let elapsed = start.elapsed();
    let speed = (DATA_SIZE as f64 / 1024.0) / elapsed.as_secs_f64();

    info!("=== Receive Complete ===");
    info!("Time: {:.2} seconds", elapsed.as_secs_f64());
    info!("Speed: {:.2} KB/s", speed);

    if recv_data == data {
        info!("Echo matches exactly");
    } else {
        error!("Echo does not match");
    }

    transport.close().expect("Failed to close transport");
}
