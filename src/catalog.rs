pub mod wardrobe;
