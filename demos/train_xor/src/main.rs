use std::env;
use std::process;

use gradnet::data::TrainingData;
use gradnet::neural::{trainer::Trainer, Hyperparams, Net};

fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/xor.txt").to_string());

    let mut data = TrainingData::open(&path).unwrap_or_else(|err| {
        eprintln!("{path}: {err}");
        process::exit(1);
    });
    let topology = data.topology().unwrap_or_else(|err| {
        eprintln!("{path}: {err}");
        process::exit(1);
    });

    let mut net = Net::new(&topology, Hyperparams::default()).unwrap_or_else(|err| {
        eprintln!("{path}: bad topology {topology:?}: {err}");
        process::exit(1);
    });

    let trainer = Trainer::new(2_000).with_log(Some(200));
    if let Err(err) = trainer.train(&mut net, &mut data) {
        eprintln!("training failed: {err}");
        process::exit(1);
    }

    println!("------------------");
    println!("Recent average error: {}", net.recent_average_error());

    // One more pass over the samples to show what the network settled on.
    loop {
        let inputs = data.next_input();
        if inputs.len() != net.input_len() {
            break;
        }
        let targets = data.next_target();
        net.forward(&inputs).unwrap();
        println!("{inputs:?} -> {:?} (want {targets:?})", net.results());
    }
}
