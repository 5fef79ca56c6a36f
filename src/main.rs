fn main() {
    certpush::cli::run();
}
