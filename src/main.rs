fn main() {
    lazyparse::cli::run();
}
