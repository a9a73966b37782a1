use rusty_rules::sanitize;

pub fn execute(value: &str) {
    println!("{}", sanitize(value));
}
