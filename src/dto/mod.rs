pub mod flipkart;
