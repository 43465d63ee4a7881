extern crate cases;
extern crate chrono;
extern crate env_logger;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

fn init_logger() {
	env_logger::builder()
		.format(|buf, record| {
			let now: DateTime<Local> = Local::now();
			let now_str = now.format("%H:%M:%S.%3f").to_string();
			writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
		})
		.init();
}

fn main() {
	init_logger();

	cases::cases::single_node::run();
	cases::cases::full_mesh::run();
	cases::cases::ring_with_cycles::run();
	cases::cases::hop_limited_line::run();
	cases::cases::stale_candidate::run();
	cases::cases::partitioned_node::run();
}
