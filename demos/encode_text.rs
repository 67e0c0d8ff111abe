use huffman::{CodeTable, Encoder, FrequencyTable};

fn main() {
    let s = String::from("Hello my name is Sam!");
    let freq = FrequencyTable::from_bytes(s.as_bytes());
    let table = CodeTable::from_frequencies(&freq).unwrap();
    print!("{table}");

    let container = Encoder::new(table).encode(s.as_bytes()).unwrap();
    let dec = String::from_utf8(huffman::decompress(&container).unwrap());

    println!("{} bytes -> {} bytes: {:?}", s.len(), container.len(), dec);
}
