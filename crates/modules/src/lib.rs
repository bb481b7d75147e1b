//! minishare-modules – Operations-Registry
//!
//! Ordnet logischen Operationsnamen eine Implementierung aus einem statischen
//! Katalog zu. Jede Implementierung ist eine Operation ohne Argumente, die
//! einen String liefert.

pub mod dispatcher;
pub mod error;
pub mod katalog;
pub mod konfig;

pub use dispatcher::ModulDispatcher;
pub use error::{ModulError, ModulResult};
pub use katalog::{Modul, ModulKatalog, ModulKonstruktor};
pub use konfig::ModulKonfig;
