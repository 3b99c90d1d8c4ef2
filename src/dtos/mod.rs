pub mod admindtos;
pub mod bookingdtos;
pub mod locationdtos;
pub mod messagedtos;
pub mod profiledtos;
pub mod reviewdtos;
pub mod userdtos;
