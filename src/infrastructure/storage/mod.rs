pub mod db;
pub mod memory;

use crate::domain::records::{Consultation, Patient, Prescription};
use crate::domain::traits::Repository;

/// Everything the clinic records need from a store
pub trait ClinicStore:
    Repository<Patient> + Repository<Consultation> + Repository<Prescription>
{
}

impl<S> ClinicStore for S where
    S: Repository<Patient> + Repository<Consultation> + Repository<Prescription>
{
}
