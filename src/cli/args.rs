// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// rnadiff - Align wild-type and mutant RNA sequences and report point substitutions
pub struct Args {
    /// wild-type (reference) sequence given inline
    #[argh(option)]
    pub reference: Option<String>,

    /// mutant (query) sequence given inline
    #[argh(option)]
    pub query: Option<String>,

    /// wild-type sequence file (.fasta or .txt); the first record is used
    #[argh(option)]
    pub reference_file: Option<String>,

    /// mutant sequence file (.fasta or .txt); every FASTA record is aligned
    #[argh(option)]
    pub query_file: Option<String>,

    /// list every single-point mutation of the reference and exit
    #[argh(switch)]
    pub enumerate: bool,

    /// CSV of per-mutation scores (Mutation, RNApdist, RNAdistance(f)) to rank
    #[argh(option)]
    pub scores: Option<String>,

    /// number of top-ranked mutations to keep (default: 10)
    #[argh(option, default = "10")]
    pub top: usize,

    /// output file (default: print to stdout)
    #[argh(option)]
    pub output: Option<String>,

    /// output format: text, tsv, json (default: text)
    #[argh(option, default = "String::from(\"text\")")]
    pub format: String,

    /// alignment mode: rna, rna-strict, rna-permissive (default: rna)
    #[argh(option, default = "String::from(\"rna\")")]
    pub alignment_mode: String,

    /// custom match score (overrides preset mode)
    #[argh(option)]
    pub match_score: Option<i32>,

    /// custom mismatch score (overrides preset mode)
    #[argh(option)]
    pub mismatch_score: Option<i32>,

    /// custom gap score, zero or negative (overrides preset mode)
    #[argh(option)]
    pub gap_score: Option<i32>,

    /// compare symbols case-sensitively and keep input case
    #[argh(switch)]
    pub case_sensitive: bool,

    /// maximum accepted sequence length (default: 5000)
    #[argh(option)]
    pub max_length: Option<usize>,

    /// input alphabet: rna, dna, nucleotide (default: nucleotide)
    #[argh(option, default = "String::from(\"nucleotide\")")]
    pub alphabet: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
