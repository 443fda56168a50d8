mod allergy_test;
mod directory_test;
mod helpers;
mod router_test;
