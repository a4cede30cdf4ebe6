pub mod budget;
pub mod bundle;
pub mod corpcode;

pub use budget::{TokenBudgeter, estimate_units};
pub use bundle::{DocumentBundle, RawDocument, Section, bundle_paths, company_id_from_path, load_bundle};
pub use corpcode::CorpCodeTable;
