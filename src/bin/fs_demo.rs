//! In-memory file system fronted by recency and frequency caches.
//!
//! Run with: cargo run --bin fs_demo --features demo -- [CAPACITY] [--policy recency,frequency]
//! Set `RUST_LOG=cachefront=trace` to also see evictions.

use std::error::Error;

use cachefront::prelude::*;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fs_demo")]
#[command(about = "In-memory file system fronted by cache policies")]
struct Args {
    /// Entries each cache may hold
    #[arg(default_value_t = 3)]
    capacity: usize,

    /// Caches to compose, in probe order (recency|lru, frequency|lfu)
    #[arg(short, long = "policy", value_delimiter = ',')]
    policies: Vec<PolicyKind>,
}

type FileSystem = CacheAddressedStore<String, String, MemoryStore<String, String>>;

fn create(fs: &mut FileSystem, name: &str, content: &str) {
    println!("Attempting to CREATE '{name}'...");
    match fs.create(name.to_string(), content.to_string()) {
        Ok(()) => println!(" -> Success."),
        Err(err) => println!(" -> Failure ({err})."),
    }
}

fn read(fs: &mut FileSystem, name: &str) {
    println!("Attempting to READ '{name}'...");
    match fs.read(&name.to_string()) {
        Ok(content) => println!(" -> Success: {content:?}"),
        Err(err) => println!(" -> Failure ({err})."),
    }
}

fn write(fs: &mut FileSystem, name: &str, content: &str) {
    println!("Attempting to WRITE to '{name}'...");
    match fs.write(&name.to_string(), content.to_string()) {
        Ok(()) => println!(" -> Success."),
        Err(err) => println!(" -> Failure ({err})."),
    }
}

fn delete(fs: &mut FileSystem, name: &str) {
    println!("Attempting to DELETE '{name}'...");
    match fs.delete(&name.to_string()) {
        Ok(()) => println!(" -> Success."),
        Err(err) => println!(" -> Failure ({err})."),
    }
}

fn list(fs: &FileSystem) {
    let mut names = fs.list();
    names.sort();
    println!("Files in {}:", fs.backing().name());
    for name in names {
        println!("- {name}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cachefront=debug")),
        )
        .init();

    let args = Args::parse();
    let capacity = args.capacity;
    let builder = StoreBuilder::new(capacity).observer(TracingObserver);
    let mut fs: FileSystem = if args.policies.is_empty() {
        builder.build(MemoryStore::new("root"))
    } else {
        args.policies
            .iter()
            .fold(builder, |builder, &kind| builder.policy(kind))
            .try_build(MemoryStore::new("root"))?
    };
    info!(capacity, caches = ?fs.caches().map(|(name, _)| name).collect::<Vec<_>>(), "file system ready");

    println!("In-Memory File System with Caching Demo");
    println!("{}", "=".repeat(40));

    println!("\n--- Step 1: CREATE files ---");
    create(&mut fs, "file1.txt", "content1");
    create(&mut fs, "file2.txt", "content2");
    create(&mut fs, "file3.txt", "content3");
    list(&fs);

    println!("\n--- Step 2: READ files to populate cache ---");
    read(&mut fs, "file1.txt");
    read(&mut fs, "file2.txt");

    println!("\n--- Step 3: WRITE to an existing file ---");
    write(&mut fs, "file1.txt", "new_content1");
    read(&mut fs, "file1.txt");

    println!("\n--- Step 4: DELETE a file ---");
    delete(&mut fs, "file2.txt");
    read(&mut fs, "file2.txt");
    list(&fs);

    Ok(())
}
