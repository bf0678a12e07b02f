//! Dumps the structure of BER encoded data.
//!
//! Provide one or more file names and you will receive one line for every
//! value contained in each file, indented by its nesting depth.
//!
//! Use `--der` to only accept DER encoded data and `--trace` to also print
//! the events of the decoder to stderr.

use std::{env, fs, process};
use bertree::{Decoder, Mode};
use bertree::decode::Event;

fn process_one(
    path: &str, decoder: &Decoder, trace: bool
) -> Result<(), String> {
    let data = fs::read(path).map_err(|err| err.to_string())?;
    let mut offset = 0;
    while offset < data.len() {
        let res = if trace {
            decoder.decode_traced(
                &data, offset, &mut |event: Event| eprintln!("{}", event)
            )
        }
        else {
            decoder.decode(&data, offset)
        };
        let node = res.map_err(|err| err.to_string())?;
        node.walk(|depth, node| {
            println!(
                "{:>6}: {:width$}{}",
                node.header().offset(), "", node, width = depth * 2
            )
        });
        offset += node.header().length();
    }
    Ok(())
}

fn main() {
    let mut decoder = Decoder::new();
    let mut trace = false;
    let mut paths = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--der" => decoder = decoder.mode(Mode::Der),
            "--trace" => trace = true,
            _ => paths.push(arg),
        }
    }
    if paths.is_empty() {
        eprintln!("Usage: berdump [--der] [--trace] <file>...");
        process::exit(1);
    }

    let mut failed = false;
    for path in &paths {
        if paths.len() > 1 {
            println!("{}:", path);
        }
        if let Err(err) = process_one(path, &decoder, trace) {
            eprintln!("{}: {}.", path, err);
            failed = true;
        }
    }
    if failed {
        process::exit(1);
    }
}
