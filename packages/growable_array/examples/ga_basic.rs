//! Basic usage of `GrowableArray`, with relocations logged through `tracing`.
//!
//! Run with `RUST_LOG=trace` to see every relocation of the storage.

use growable_array::{GrowableArray, growable_array, reserve};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut array = GrowableArray::new();

    for value in 1..=5 {
        array.push(value);
        println!(
            "pushed {value}: len = {}, capacity = {}",
            array.len(),
            array.capacity()
        );
    }

    array.insert(0, 0);
    println!("after insert at front: {array:?}");

    let next = array.erase(3);
    println!("after erase at 3: {array:?}, next value is {}", array[next]);

    match array.at(100) {
        Ok(value) => println!("unexpected value {value}"),
        Err(error) => println!("at(100) failed: {error}"),
    }

    array.resize(2);
    println!(
        "after resize to 2: {array:?}, capacity still {}",
        array.capacity()
    );

    let mut reserved = GrowableArray::<String>::from(reserve(4));
    reserved.extend(["a", "b", "c"].map(String::from));
    println!(
        "reserved array: {reserved:?}, capacity = {}",
        reserved.capacity()
    );

    println!(
        "[1, 2] < [1, 2, 3] is {}",
        growable_array![1, 2] < growable_array![1, 2, 3]
    );
}
