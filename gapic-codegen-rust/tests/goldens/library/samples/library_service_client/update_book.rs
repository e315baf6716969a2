// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START library_v1_generated_library_service_client_update_book]
use std::error::Error;

use example_library_v1::LibraryServiceClient;
use example_library_v1::model::UpdateBookRequest;

pub fn sample_update_book(client: &LibraryServiceClient) -> Result<(), Box<dyn Error>> {
    let request = UpdateBookRequest {
        book: Some(Default::default()),
        ..Default::default()
    };
    let response = client.update_book(request)?;
    println!("{response:?}");
    Ok(())
}
// [END library_v1_generated_library_service_client_update_book]
