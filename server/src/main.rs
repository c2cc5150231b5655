use log::info;
use std::net::TcpListener;
use std::time::Instant;
use buftransport::{BufferConfig, BufferedTransport, StreamTransport, Transport};

const DATA_SIZE: usize = 1024 * 1024; // 1 MB
const DEFAULT_ADDR: &str = "127.0.0.1:7878";
const CHUNK_SIZE: usize = 64;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).expect("Failed to bind");
    info!("Server listening on {}", addr);
    let (stream, peer) = listener.accept().expect("Failed to accept connection");
    info!("Client connected from {}", peer);

    let reader = stream.try_clone().expect("Failed to clone stream");
    let mut transport = BufferedTransport::with_config(
        StreamTransport::new(reader, stream),
        BufferConfig::new().with_read_capacity(16 * 1024).with_write_capacity(8 * 1024),
    )
    .expect("Invalid buffer config");

    // Receive in small pieces; the input buffer batches the socket reads
    info!("Receiving {} KB from client...", DATA_SIZE / 1024);
    let start = Instant::now();
    let mut recv_data = vec![0u8; DATA_SIZE];
    for chunk in recv_data.chunks_mut(CHUNK_SIZE) {
        transport.read_exact(chunk).expect("Failed to receive data");
    }
    let elapsed = start.elapsed();
    let speed = (DATA_SIZE as f64 / 1024.0) / elapsed.as_secs_f64();

    info!("=== Receive Complete ===");
    info!("Total received: {} KB", DATA_SIZE / 1024);
    info!("Time: {:.2} seconds", elapsed.as_secs_f64());
    info!("Speed: {:.2} KB/s", speed);

    info!("Echoing data back...");
    let start = Instant::now();
    for chunk in recv_data.chunks(CHUNK_SIZE) {
        transport.write(chunk).expect("Failed to send data");
    }
    transport.flush().expect("Failed to flush");
    let elapsed = start.elapsed();
    let speed = (DATA_SIZE as f64 / 1024.0) / elapsed.as_secs_f64();

    info!("=== Send Complete ===");
    info!("Time: {:.2} seconds", elapsed.as_secs_f64());
    info!("Speed: {:.2} KB/s", speed);

    transport.close().expect("Failed to close transport");
    info!("Client handler finished");
}
