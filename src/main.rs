fn main() -> anyhow::Result<()> {
    coordcanvas::run(std::env::args_os().nth(1).map(Into::into))
}
