fn main() {
    codestash_cli::run_main();
}
