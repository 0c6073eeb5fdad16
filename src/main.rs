fn main() {
    #[cfg(feature = "cli")]
    okomi::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("okomi: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
