pub mod bookingmodel;
pub mod messagemodels;
pub mod profilemodels;
pub mod reviewmodel;
pub mod testimonialmodel;
pub mod usermodel;
