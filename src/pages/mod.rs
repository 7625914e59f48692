//! Per-view page models. Each page reads shared state through the handles
//! it is given and mutates it only through navigation or cache operations.

pub mod academics;
pub mod admissions;
pub mod department;
pub mod home;
pub mod portal;

pub use academics::AcademicsPage;
pub use admissions::{AdmissionsWizard, ApplicationForm};
pub use department::{
    DepartmentDetail, DepartmentNotFound, DepartmentPage, DetailContext, FacultyProfile,
};
pub use home::HomePage;
pub use portal::{LoginState, PortalPage};
