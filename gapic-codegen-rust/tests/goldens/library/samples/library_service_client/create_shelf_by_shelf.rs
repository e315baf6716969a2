// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START library_v1_generated_library_service_client_create_shelf_by_shelf]
use std::error::Error;

use example_library_v1::LibraryServiceClient;
use example_library_v1::model::Shelf;

pub fn sample_create_shelf_by_shelf(client: &LibraryServiceClient) -> Result<(), Box<dyn Error>> {
    let shelf = Shelf::default();
    let response = client.create_shelf_by_shelf(shelf)?;
    println!("{response:?}");
    Ok(())
}
// [END library_v1_generated_library_service_client_create_shelf_by_shelf]
