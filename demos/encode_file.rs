use huffman::files;
use std::env;
use std::path::PathBuf;

fn main() {
    let fp = PathBuf::from(
        env::args()
            .nth(1)
            .expect("Please provide path to input file as first argument."),
    );

    // encode scope - save to file
    let encoded = files::compressed_path(&fp);
    {
        let summary = files::compress_file(&fp, &encoded).unwrap();
        println!(
            "{} -> {}: {:.1}%",
            fp.display(),
            encoded.display(),
            summary.ratio() * 100.0
        );
    }

    // decode scope - read from file
    {
        let decoded = encoded.with_extension("decoded");
        files::decompress_file(&encoded, &decoded).unwrap();

        let original = files::read_source(&fp).unwrap();
        let restored = files::read_source(&decoded).unwrap();
        assert_eq!(original, restored);
        println!("{} matches the original", decoded.display());
    }
}
