use std::io::Write;
use rand_mrg::*;

// Writes raw little-endian 32-bit output to stdout for statistical test batteries, e.g.
// `rand_mrg | RNG_test stdin32`.
//
// Usage: rand_mrg [streams to skip] [antithetic]

fn main() -> std::io::Result<()> {

    let mut args = std::env::args().skip(1);
    let skip: u64 = args.next().and_then(|x| x.parse().ok()).unwrap_or(0);
    let antithetic = args.next().map_or(false, |x| x == "antithetic");

    let mut factory = StreamFactory::new();
    factory.advance_seeds(skip);
    let mut rnd = factory.next_stream();
    rnd.set_antithetic_option(antithetic);

    let mut stdout = std::io::stdout();
    let mut v: Vec<u8> = Vec::new();

    loop {
        v.extend_from_slice(&rnd.next_u32().to_le_bytes());

        if v.len() >= 0x10000 {
            stdout.write_all(v.as_slice())?;
            v.clear();
        }
    }
}
