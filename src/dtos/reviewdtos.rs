use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewDto {
    #[serde(rename = "reviewedUserId")]
    pub reviewed_user_id: Uuid,

    #[serde(rename = "bookingId")]
    pub booking_id: Option<Uuid>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_enforced() {
        let base = |rating| CreateReviewDto {
            reviewed_user_id: Uuid::new_v4(),
            booking_id: None,
            rating,
            comment: None,
        };

        assert!(base(1).validate().is_ok());
        assert!(base(5).validate().is_ok());
        assert!(base(0).validate().is_err());
        assert!(base(6).validate().is_err());
    }
}
