use evgrab::Capabilities;

fn main() {
    let caps = Capabilities::current();
    println!("{caps}");
    match caps.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to render capabilities: {e}"),
    }
}
