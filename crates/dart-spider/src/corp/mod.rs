/// The OpenDART API client, and the [`CompanyLookup`] seam it fills.
///
/// [`CompanyLookup`]: client::CompanyLookup
pub mod client;

/// Every registered corporation code, filtered to the listed ones; see the
/// [corpCode API].
///
/// [corpCode API]: https://engopendart.fss.or.kr/guide/detail.do?apiGrpCd=DE001&apiId=AE00004
pub mod codes;

/// Company overviews for the listed corporations of one market.
pub mod company;

pub use client::{CompanyLookup, CompanyResponse, OpenDart};
pub use codes::{CorpCode, CorpCodes};
pub use company::{Companies, Company};
