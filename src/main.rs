fn main() {
    match statespace::solver() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
