use alto_logger::TermLogger;
use benchmark::{save_to_csv, Message, WindowConfig, WINDOW};
use cache_queue::CacheQueue;
use log::{error, info, trace};
use std::env;
use std::process;
use std::thread::sleep;
use std::time::{Instant, SystemTime};

fn main() {
    TermLogger::default().init().unwrap();

    let mut args = env::args();
    args.next();
    let config = match WindowConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            println!("Usage: window [TICKS] [OUTPUT]");
            process::exit(1);
        }
    };
    info!("Running window benchmark: {:?}", config);

    let mut window: CacheQueue<Vec<u8>, WINDOW> = CacheQueue::new();
    let mut samples = Vec::with_capacity(config.ticks as usize);
    let mut evicted_bytes = 0;

    for tick in 0..config.ticks {
        let start = Instant::now();

        let message = Message {
            time: SystemTime::now(),
            tick,
        };
        let payload = bincode::serialize(&message).expect("Failed to serialize message.");

        let push_start = Instant::now();
        if let Some(evicted) = window.push_back(payload) {
            evicted_bytes += evicted.len();
        }
        samples.push((tick, push_start.elapsed()));

        if window.is_full() && (tick + 1) % WINDOW as u64 == 0 {
            let window_bytes: usize = window.make_contiguous().iter().map(Vec::len).sum();
            trace!("Tick {}: window normalized, {} bytes buffered", tick, window_bytes);
        }

        if let Some(oldest) = window.front() {
            let oldest: Message = bincode::deserialize(oldest).expect("Failed to deserialize message.");
            trace!("Tick {}: oldest message in window from tick {}", tick, oldest.tick);
        }

        if let Some(wait) = (start + config.frame_duration).checked_duration_since(Instant::now()) {
            sleep(wait);
        }
    }

    info!(
        "Finished {} ticks, window holds {} messages, {} bytes evicted",
        config.ticks,
        window.len(),
        evicted_bytes
    );
    if let Err(e) = save_to_csv(&samples, &config.output) {
        error!("Failed to write samples: {}", e);
        process::exit(1);
    }
}
