mod node;

pub use node::{CategoryNode, FlatSubcategory, GuideNode, SubcategoryNode};
