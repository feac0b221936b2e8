// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run the XOR demo with:
//   cargo run --example xor -- [config.json]
fn main() {
    println!("tinker-nn: a hackable feed-forward network trained by backpropagation.");
    println!("Run `cargo run --example xor` to train it on XOR.");
}
