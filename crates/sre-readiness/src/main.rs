fn main() -> anyhow::Result<()> {
    sre_readiness::cli::main()
}
