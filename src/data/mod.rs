pub mod chart_image;
